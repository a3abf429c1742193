//! The end-of-game rule, shared by the canonical board and the heuristic
//! evaluator so both always agree on when a match is over.

use std::fmt;

use crate::board::position::Position;
use crate::board::side::Side;
use crate::move_generator::ray::{Direction, Occupancy};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Winner {
    NoWinner,
    SideAWins,
    SideBWins,
}

impl Winner {
    pub fn side(&self) -> Option<Side> {
        match self {
            Winner::NoWinner => None,
            Winner::SideAWins => Some(Side::A),
            Winner::SideBWins => Some(Side::B),
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Winner::SideAWins,
            Side::B => Winner::SideBWins,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::NoWinner => write!(f, "no winner"),
            Winner::SideAWins => write!(f, "side A wins"),
            Winner::SideBWins => write!(f, "side B wins"),
        }
    }
}

/// A queen is surrounded when each of its 8 neighbours is a queen, a burned
/// tile, or off the board.
#[inline]
pub fn queen_is_surrounded<O: Occupancy + ?Sized>(occupancy: &O, queen: Position) -> bool {
    let dimensions = occupancy.dimensions();
    Direction::ALL.iter().all(|direction| match direction.step(queen, dimensions) {
        Some(neighbour) => !occupancy.is_free(neighbour),
        None => true,
    })
}

pub fn has_free_queen<O: Occupancy + ?Sized>(occupancy: &O, queens: &[Position]) -> bool {
    queens
        .iter()
        .any(|&queen| !queen_is_surrounded(occupancy, queen))
}

/// A side loses once none of its queens can move while the other side still
/// has a free queen. When both or neither are stuck this rule names no winner.
pub fn winner<O: Occupancy + ?Sized>(
    occupancy: &O,
    side_a: &[Position],
    side_b: &[Position],
) -> Winner {
    match (
        has_free_queen(occupancy, side_a),
        has_free_queen(occupancy, side_b),
    ) {
        (false, true) => Winner::SideBWins,
        (true, false) => Winner::SideAWins,
        _ => Winner::NoWinner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons_position;

    #[test]
    fn test_corner_queen_surrounded_by_edge_and_burns() {
        let board = amazons_position! { 3, 3;
            ax.
            xx.
            ..b
        };
        assert!(queen_is_surrounded(&board, Position::new(0, 0)));
        assert!(!queen_is_surrounded(&board, Position::new(2, 2)));
        assert_eq!(board.winner(), Winner::SideBWins);
    }

    #[test]
    fn test_queens_block_each_other() {
        let board = amazons_position! { 2, 2;
            ab
            xx
        };
        assert!(queen_is_surrounded(&board, Position::new(0, 0)));
        assert!(queen_is_surrounded(&board, Position::new(0, 1)));
        assert_eq!(board.winner(), Winner::NoWinner);
    }

    #[test]
    fn test_one_free_queen_is_enough() {
        let board = amazons_position! { 3, 4;
            ax.b
            xx..
            a...
        };
        assert_eq!(board.winner(), Winner::NoWinner);
    }
}
