use std::ops::ControlFlow;

use log::trace;
use smallvec::SmallVec;

use crate::amazons_move::AmazonsMove;
use crate::board::position::Position;
use crate::board::side::Side;
use crate::snapshot::BoardSnapshot;

use super::ray::{ray, Direction, Occupancy, Relocated};

pub type MoveList = Vec<AmazonsMove>;
pub type TargetList = SmallVec<[Position; 32]>;

/// Enumerates legal (relocate, burn) pairs by casting rays. Holds no state;
/// every method reads the occupancy it is handed.
#[derive(Clone, Copy, Default, Debug)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Every tile the queen on `queen` can relocate to.
    pub fn destinations<O: Occupancy + ?Sized>(&self, occupancy: &O, queen: Position) -> TargetList {
        Direction::ALL
            .iter()
            .flat_map(|&direction| ray(occupancy, queen, direction))
            .collect()
    }

    /// Every tile that can be burned after moving `origin` to `destination`.
    /// The vacated origin counts as a free tile.
    pub fn burn_targets<O: Occupancy + ?Sized>(
        &self,
        occupancy: &O,
        origin: Position,
        destination: Position,
    ) -> TargetList {
        let relocated = Relocated::new(occupancy, origin, destination);
        Direction::ALL
            .iter()
            .flat_map(|&direction| ray(&relocated, destination, direction))
            .collect()
    }

    /// Visits every move of the queen on `queen` whose relocation leaves along
    /// `direction`, in ray order. Stops early if `visit` breaks.
    pub fn for_each_move_in_direction<O, F>(
        &self,
        occupancy: &O,
        side: Side,
        queen: Position,
        direction: Direction,
        mut visit: F,
    ) -> ControlFlow<()>
    where
        O: Occupancy + ?Sized,
        F: FnMut(AmazonsMove) -> ControlFlow<()>,
    {
        for destination in ray(occupancy, queen, direction) {
            let relocated = Relocated::new(occupancy, queen, destination);
            for &burn_direction in Direction::ALL.iter() {
                for burn in ray(&relocated, destination, burn_direction) {
                    if visit(AmazonsMove::new(side, queen, destination, burn)).is_break() {
                        trace!("stopped {} enumeration for {} at {}", direction, queen, destination);
                        return ControlFlow::Break(());
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// All legal moves for the side to move, queen by queen, direction by direction.
    pub fn generate_moves(&self, snapshot: &BoardSnapshot) -> MoveList {
        let side = snapshot.side_to_move();
        let mut moves = MoveList::new();
        for &queen in snapshot.queens(side) {
            for &direction in Direction::ALL.iter() {
                let _ = self.for_each_move_in_direction(snapshot, side, queen, direction, |m| {
                    moves.push(m);
                    ControlFlow::Continue(())
                });
            }
        }
        moves
    }

    /// Immediately available relocations for one side, ignoring burns.
    pub fn count_destinations<O: Occupancy + ?Sized>(&self, occupancy: &O, queens: &[Position]) -> usize {
        queens
            .iter()
            .map(|&queen| {
                Direction::ALL
                    .iter()
                    .map(|&direction| ray(occupancy, queen, direction).count())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Number of leaf positions reachable in exactly `depth` plies.
    pub fn count_positions(&self, snapshot: &BoardSnapshot, depth: u8) -> usize {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves(snapshot);
        if depth == 1 {
            return moves.len();
        }
        moves
            .iter()
            .map(|m| self.count_positions(&snapshot.apply(m), depth - 1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazons_position;
    use crate::board::StartingPosition;
    use rustc_hash::FxHashSet;

    fn small_snapshot() -> BoardSnapshot {
        BoardSnapshot::from_setup(&StartingPosition::small()).unwrap()
    }

    /// Independent count: scan every tile pair along straight lines instead
    /// of casting rays.
    fn brute_force_count(snapshot: &BoardSnapshot) -> usize {
        let dims = snapshot.dimensions();
        let side = snapshot.side_to_move();
        let clear = |from: Position, to: Position, free: &dyn Fn(Position) -> bool| -> bool {
            let d_row = to.row as i16 - from.row as i16;
            let d_col = to.col as i16 - from.col as i16;
            let straight = (d_row == 0) != (d_col == 0) || (d_row != 0 && d_row.abs() == d_col.abs());
            if !straight {
                return false;
            }
            let steps = d_row.abs().max(d_col.abs());
            (1..=steps).all(|i| {
                let tile = Position::new(
                    (from.row as i16 + d_row.signum() * i) as u8,
                    (from.col as i16 + d_col.signum() * i) as u8,
                );
                free(tile)
            })
        };

        let mut total = 0;
        for &queen in snapshot.queens(side) {
            for destination in dims.positions() {
                if !clear(queen, destination, &|p: Position| snapshot.is_free(p)) {
                    continue;
                }
                let after = |p: Position| p != destination && (p == queen || snapshot.is_free(p));
                total += dims
                    .positions()
                    .filter(|&burn| clear(destination, burn, &after))
                    .count();
            }
        }
        total
    }

    #[test]
    fn test_small_board_move_count_matches_brute_force() {
        let snapshot = small_snapshot();
        let moves = MoveGenerator::new().generate_moves(&snapshot);
        assert_eq!(moves.len(), brute_force_count(&snapshot));

        let unique: FxHashSet<_> = moves.iter().collect();
        assert_eq!(unique.len(), moves.len(), "duplicate moves generated");
    }

    #[test]
    fn test_moves_stay_on_free_tiles() {
        let snapshot = small_snapshot();
        let dims = snapshot.dimensions();
        for m in MoveGenerator::new().generate_moves(&snapshot) {
            assert_eq!(m.side, Side::A);
            assert!(dims.contains(m.destination) && dims.contains(m.burn));
            assert!(snapshot.is_free(m.destination), "{} lands on an occupied tile", m);
            assert!(
                snapshot.is_free(m.burn) || m.burn == m.origin,
                "{} burns an occupied tile",
                m
            );
            assert_ne!(m.burn, m.destination);
        }
    }

    #[test]
    fn test_vacated_origin_is_a_burn_target() {
        let board = amazons_position! { 1, 3;
            a..
        };
        let snapshot = BoardSnapshot::from_board(&board, 0);
        let moves = MoveGenerator::new().generate_moves(&snapshot);
        // (0,0)->(0,1) burns (0,0) or (0,2); (0,0)->(0,2) burns (0,1) or (0,0)
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&AmazonsMove::new(
            Side::A,
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 0)
        )));
    }

    #[test]
    fn test_surrounded_queen_has_no_moves() {
        let board = amazons_position! { 3, 3;
            ax.
            xx.
            ..b
        };
        let snapshot = BoardSnapshot::from_board(&board, 0);
        assert!(MoveGenerator::new().generate_moves(&snapshot).is_empty());
        assert_eq!(
            MoveGenerator::new().count_destinations(&snapshot, snapshot.queens(Side::B)),
            4
        );
    }

    #[test]
    fn test_direction_enumeration_stops_on_break() {
        let snapshot = small_snapshot();
        let mut seen = 0;
        let flow = MoveGenerator::new().for_each_move_in_direction(
            &snapshot,
            Side::A,
            Position::new(2, 0),
            Direction::East,
            |_| {
                seen += 1;
                if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        assert!(flow.is_break());
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_count_positions() {
        let snapshot = small_snapshot();
        let generator = MoveGenerator::new();
        let depth_one = generator.generate_moves(&snapshot).len();
        assert_eq!(generator.count_positions(&snapshot, 0), 1);
        assert_eq!(generator.count_positions(&snapshot, 1), depth_one);
    }
}
