//! Immutable game state used by the search tree.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::amazons_move::AmazonsMove;
use crate::board::error::BoardError;
use crate::board::position::{BoardDimensions, Position};
use crate::board::side::Side;
use crate::board::{Board, StartingPosition};
use crate::move_generator::ray::Occupancy;
use crate::move_generator::MoveGenerator;
use crate::rules::{self, Winner};

pub type QueenSet = SmallVec<[Position; 8]>;

/// Queen positions of both sides, the burned set and the ply this state was
/// reached at. A snapshot never changes after construction; moves produce new
/// snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    dimensions: BoardDimensions,
    side_a: QueenSet,
    side_b: QueenSet,
    burned: FxHashSet<Position>,
    ply: u32,
}

impl BoardSnapshot {
    /// Builds a snapshot from untrusted input, rejecting positions off the
    /// board and any tile claimed twice.
    pub fn new<A, B, X>(
        dimensions: BoardDimensions,
        side_a: A,
        side_b: B,
        burned: X,
        ply: u32,
    ) -> Result<Self, BoardError>
    where
        A: IntoIterator<Item = Position>,
        B: IntoIterator<Item = Position>,
        X: IntoIterator<Item = Position>,
    {
        let side_a: QueenSet = side_a.into_iter().collect();
        let side_b: QueenSet = side_b.into_iter().collect();
        let burned_list: Vec<Position> = burned.into_iter().collect();

        let mut seen = FxHashSet::default();
        for &position in side_a.iter().chain(side_b.iter()).chain(burned_list.iter()) {
            dimensions.check(position)?;
            if !seen.insert(position) {
                return Err(BoardError::OverlappingPositions { position });
            }
        }

        Ok(Self {
            dimensions,
            side_a,
            side_b,
            burned: burned_list.into_iter().collect(),
            ply,
        })
    }

    pub fn from_setup(setup: &StartingPosition) -> Result<Self, BoardError> {
        Self::new(
            setup.dimensions,
            setup.side_a.iter().copied(),
            setup.side_b.iter().copied(),
            setup.burned.iter().copied(),
            setup.starting_ply(),
        )
    }

    pub fn from_board(board: &Board, ply: u32) -> Self {
        Self {
            dimensions: board.dimensions(),
            side_a: board.queens(Side::A).into_iter().collect(),
            side_b: board.queens(Side::B).into_iter().collect(),
            burned: board.burned().into_iter().collect(),
            ply,
        }
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn side_to_move(&self) -> Side {
        Side::for_ply(self.ply)
    }

    pub fn queens(&self, side: Side) -> &[Position] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn burned(&self) -> &FxHashSet<Position> {
        &self.burned
    }

    /// Number of tiles taken by queens or burns.
    pub fn occupied_count(&self) -> usize {
        self.side_a.len() + self.side_b.len() + self.burned.len()
    }

    /// True when the queen and burned sets are pairwise disjoint and in bounds.
    pub fn is_consistent(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.side_a
            .iter()
            .chain(self.side_b.iter())
            .chain(self.burned.iter())
            .all(|&position| self.dimensions.contains(position) && seen.insert(position))
    }

    /// True when `amazons_move` belongs to the side to move, starts on one of
    /// its queens, travels along a clear line and burns a tile the relocated
    /// queen can reach.
    pub fn is_legal(&self, amazons_move: &AmazonsMove) -> bool {
        let generator = MoveGenerator::default();
        let (origin, destination) = (amazons_move.origin, amazons_move.destination);

        amazons_move.side == self.side_to_move()
            && self.queens(amazons_move.side).contains(&origin)
            && generator.destinations(self, origin).contains(&destination)
            && generator
                .burn_targets(self, origin, destination)
                .contains(&amazons_move.burn)
    }

    /// Produces the state after `amazons_move`. The move is trusted to come
    /// from the move generator or to have passed `is_legal`.
    ///
    /// # Panics
    ///
    /// Panics if the moving side has no queen on the move's origin.
    pub fn apply(&self, amazons_move: &AmazonsMove) -> BoardSnapshot {
        let mut next = self.clone();
        let queens = match amazons_move.side {
            Side::A => &mut next.side_a,
            Side::B => &mut next.side_b,
        };
        match queens.iter_mut().find(|q| **q == amazons_move.origin) {
            Some(queen) => *queen = amazons_move.destination,
            None => panic!(
                "move {} has no side {} queen on its origin",
                amazons_move, amazons_move.side
            ),
        }
        next.burned.insert(amazons_move.burn);
        next.ply += 1;

        debug_assert!(
            next.is_consistent(),
            "move {} produced overlapping tiles",
            amazons_move
        );
        next
    }

    pub fn winner(&self) -> Winner {
        rules::winner(self, &self.side_a, &self.side_b)
    }
}

impl Occupancy for BoardSnapshot {
    fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    #[inline]
    fn is_free(&self, position: Position) -> bool {
        self.dimensions.contains(position)
            && !self.side_a.contains(&position)
            && !self.side_b.contains(&position)
            && !self.burned.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons_position;

    #[test]
    fn test_overlapping_sets_are_rejected() {
        let dims = BoardDimensions::new(4, 4).unwrap();
        let result = BoardSnapshot::new(
            dims,
            vec![Position::new(0, 0)],
            vec![Position::new(1, 1)],
            vec![Position::new(0, 0)],
            0,
        );
        assert_eq!(
            result,
            Err(BoardError::OverlappingPositions {
                position: Position::new(0, 0)
            })
        );
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let dims = BoardDimensions::new(4, 4).unwrap();
        let result = BoardSnapshot::new(dims, vec![Position::new(4, 0)], vec![], vec![], 0);
        assert!(matches!(result, Err(BoardError::OutOfBounds { .. })));
    }

    #[test]
    fn test_apply_moves_queen_and_burns() {
        let snapshot = BoardSnapshot::from_setup(&StartingPosition::small()).unwrap();
        let amazons_move = AmazonsMove::new(
            Side::A,
            Position::new(2, 0),
            Position::new(2, 3),
            Position::new(2, 4),
        );
        let next = snapshot.apply(&amazons_move);

        assert_eq!(next.ply(), 1);
        assert_eq!(next.side_to_move(), Side::B);
        assert!(next.is_free(Position::new(2, 0)));
        assert!(next.queens(Side::A).contains(&Position::new(2, 3)));
        assert!(next.burned().contains(&Position::new(2, 4)));
        assert!(next.is_consistent());

        // the parent is untouched
        assert!(snapshot.queens(Side::A).contains(&Position::new(2, 0)));
        assert!(snapshot.burned().is_empty());
    }

    #[test]
    fn test_is_legal() {
        let snapshot = BoardSnapshot::from_setup(&StartingPosition::small()).unwrap();
        let legal = AmazonsMove::new(
            Side::A,
            Position::new(2, 0),
            Position::new(2, 3),
            Position::new(2, 0),
        );
        assert!(snapshot.is_legal(&legal), "burning the vacated origin is allowed");

        let wrong_side = AmazonsMove { side: Side::B, ..legal };
        let empty_origin = AmazonsMove {
            origin: Position::new(1, 1),
            ..legal
        };
        let knight_jump = AmazonsMove {
            destination: Position::new(3, 2),
            burn: Position::new(3, 3),
            ..legal
        };
        let unreachable_burn = AmazonsMove {
            burn: Position::new(0, 0),
            ..legal
        };
        for illegal in [wrong_side, empty_origin, knight_jump, unreachable_burn] {
            assert!(!snapshot.is_legal(&illegal), "{} should be illegal", illegal);
        }
    }

    #[test]
    #[should_panic(expected = "no side A queen")]
    fn test_apply_panics_without_a_queen_on_the_origin() {
        let snapshot = BoardSnapshot::from_setup(&StartingPosition::small()).unwrap();
        snapshot.apply(&AmazonsMove::new(
            Side::A,
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 3),
        ));
    }

    #[test]
    fn test_round_trips_through_board() {
        let board = amazons_position! { 3, 3;
            a.x
            ...
            x.b
        };
        let snapshot = BoardSnapshot::from_board(&board, 4);
        assert_eq!(Board::from_snapshot(&snapshot), board);
        assert_eq!(snapshot.occupied_count(), 4);
        assert_eq!(snapshot.side_to_move(), Side::A);
    }
}
