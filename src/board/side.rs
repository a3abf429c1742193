use std::fmt;
use std::str::FromStr;

use crate::search_tree::Score;

/// One of the two players. Side A moves on even plies and is the maximizing
/// side for every score the engine produces.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    A = 0,
    B = 1,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    pub fn opposite(&self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn maximize_score(&self) -> bool {
        match self {
            Side::A => true,
            Side::B => false,
        }
    }

    /// The value a node's running score starts from before any child is folded in.
    pub fn initial_bound(&self) -> Score {
        if self.maximize_score() {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        }
    }

    /// The side to move at the given ply. Even plies belong to side A.
    pub fn for_ply(ply: u32) -> Self {
        if ply % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }

    pub fn random() -> Self {
        if fastrand::bool() {
            Side::A
        } else {
            Side::B
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::A => "A",
            Side::B => "B",
        };
        write!(f, "{}", side_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Side {
    type Err = ParseError;
    fn from_str(side: &str) -> Result<Self, Self::Err> {
        match side.to_ascii_lowercase().as_str() {
            "a" => Ok(Side::A),
            "b" => Ok(Side::B),
            "random" => Ok(Side::random()),
            _ => Err("invalid side; options are: a, b, random"),
        }
    }
}
