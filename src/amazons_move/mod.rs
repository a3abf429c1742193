use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::position::Position;
use crate::board::side::Side;

static MOVE_NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ *([0-9]+) *, *([0-9]+) *-> *([0-9]+) *, *([0-9]+) */ *([0-9]+) *, *([0-9]+) *$")
        .expect("move notation regex is valid")
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoveParseError {
    #[error("cannot parse move {input:?}, expected `row,col->row,col/row,col`")]
    InvalidNotation { input: String },
}

/// One complete ply: relocate the queen on `origin` to `destination`, then
/// burn `burn`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AmazonsMove {
    pub side: Side,
    pub origin: Position,
    pub destination: Position,
    pub burn: Position,
}

impl AmazonsMove {
    pub fn new(side: Side, origin: Position, destination: Position, burn: Position) -> Self {
        Self {
            side,
            origin,
            destination,
            burn,
        }
    }

    /// Parses `row,col->row,col/row,col` for the given side. Bounds and
    /// legality are checked later by the board.
    pub fn parse(side: Side, input: &str) -> Result<Self, MoveParseError> {
        let invalid = || MoveParseError::InvalidNotation {
            input: input.to_string(),
        };
        let caps = MOVE_NOTATION.captures(input).ok_or_else(invalid)?;
        let mut coords = [0u8; 6];
        for (i, coord) in coords.iter_mut().enumerate() {
            *coord = caps[i + 1].parse::<u8>().map_err(|_| invalid())?;
        }

        Ok(Self::new(
            side,
            Position::new(coords[0], coords[1]),
            Position::new(coords[2], coords[3]),
            Position::new(coords[4], coords[5]),
        ))
    }

    /// True if `input` has the shape of a move, whatever its coordinates.
    pub fn is_notation(input: &str) -> bool {
        MOVE_NOTATION.is_match(input)
    }

    pub fn to_notation(&self) -> String {
        format!("{}->{}/{}", self.origin, self.destination, self.burn)
    }
}

impl fmt::Display for AmazonsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        let parsed = AmazonsMove::parse(Side::A, "2,0->2,3/2,4").unwrap();
        assert_eq!(
            parsed,
            AmazonsMove::new(
                Side::A,
                Position::new(2, 0),
                Position::new(2, 3),
                Position::new(2, 4)
            )
        );
        assert_eq!(parsed.to_string(), "2,0->2,3/2,4");
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let parsed = AmazonsMove::parse(Side::B, " 0, 3 -> 4,3 / 4,0 ").unwrap();
        assert_eq!(parsed.side, Side::B);
        assert_eq!(parsed.burn, Position::new(4, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(AmazonsMove::parse(Side::A, "e2e4").is_err());
        assert!(AmazonsMove::parse(Side::A, "2,0->2,3").is_err());
        assert!(AmazonsMove::parse(Side::A, "2,0->2,300/1,1").is_err());
    }
}
