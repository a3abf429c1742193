pub mod error;
pub mod position;
pub mod setup;
pub mod side;

mod display;

#[cfg(test)]
mod tests;

use error::BoardError;
use log::debug;
use position::{BoardDimensions, Position};
use side::Side;

use crate::amazons_move::AmazonsMove;
use crate::move_generator::ray::{Direction, Occupancy};
use crate::rules::{self, Winner};
use crate::snapshot::BoardSnapshot;

pub use setup::StartingPosition;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Queen(Side),
    Burned,
}

/// The canonical match grid. Every committed move is validated against this
/// board on its own terms before it is applied, independently of the search.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    dimensions: BoardDimensions,
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new(dimensions: BoardDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![Tile::Empty; dimensions.area()],
        }
    }

    pub fn from_setup(setup: &StartingPosition) -> Result<Self, BoardError> {
        let mut board = Board::new(setup.dimensions);
        for &queen in &setup.side_a {
            board.put(queen, Tile::Queen(Side::A))?;
        }
        for &queen in &setup.side_b {
            board.put(queen, Tile::Queen(Side::B))?;
        }
        for &burned in &setup.burned {
            board.put(burned, Tile::Burned)?;
        }
        Ok(board)
    }

    /// Parses a row-major layout of `.`, `a`, `b` and `x` characters.
    pub fn from_layout(rows: u8, cols: u8, layout: &str) -> Result<Self, BoardError> {
        let dimensions = BoardDimensions::new(rows, cols)?;
        let tiles = layout
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(|c| {
                Tile::from_char(c).ok_or_else(|| BoardError::InvalidLayout {
                    msg: format!("unknown tile character {:?}", c),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if tiles.len() != dimensions.area() {
            return Err(BoardError::InvalidLayout {
                msg: format!(
                    "expected {} tiles for a {} board, got {}",
                    dimensions.area(),
                    dimensions,
                    tiles.len()
                ),
            });
        }

        Ok(Self { dimensions, tiles })
    }

    /// Materializes a snapshot onto a fresh grid, e.g. for display.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let mut board = Board::new(snapshot.dimensions());
        for side in Side::ALL {
            for &queen in snapshot.queens(side) {
                let index = board.dimensions.index(queen);
                board.tiles[index] = Tile::Queen(side);
            }
        }
        for &burned in snapshot.burned() {
            let index = board.dimensions.index(burned);
            board.tiles[index] = Tile::Burned;
        }
        board
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    pub fn get(&self, position: Position) -> Result<Tile, BoardError> {
        self.dimensions.check(position)?;
        Ok(self.tiles[self.dimensions.index(position)])
    }

    pub fn put(&mut self, position: Position, tile: Tile) -> Result<(), BoardError> {
        self.dimensions.check(position)?;
        let index = self.dimensions.index(position);
        if self.tiles[index] != Tile::Empty {
            return Err(BoardError::TileOccupied { position });
        }
        self.tiles[index] = tile;
        Ok(())
    }

    pub fn queens(&self, side: Side) -> Vec<Position> {
        self.positions_of(Tile::Queen(side))
    }

    pub fn burned(&self) -> Vec<Position> {
        self.positions_of(Tile::Burned)
    }

    fn positions_of(&self, wanted: Tile) -> Vec<Position> {
        self.dimensions
            .positions()
            .filter(|&position| self.tiles[self.dimensions.index(position)] == wanted)
            .collect()
    }

    /// Checks that `amazons_move` is legal for `side_to_move` without applying it.
    pub fn validate_move(
        &self,
        amazons_move: &AmazonsMove,
        side_to_move: Side,
    ) -> Result<(), BoardError> {
        if amazons_move.side != side_to_move {
            return Err(BoardError::WrongSideToMove {
                expected: side_to_move,
                actual: amazons_move.side,
            });
        }

        let origin = amazons_move.origin;
        if self.get(origin)? != Tile::Queen(amazons_move.side) {
            return Err(BoardError::NoQueenAtOrigin {
                side: amazons_move.side,
                position: origin,
            });
        }
        self.dimensions.check(amazons_move.destination)?;
        self.dimensions.check(amazons_move.burn)?;

        self.check_clear_line(origin, amazons_move.destination, None)?;
        self.check_clear_line(amazons_move.destination, amazons_move.burn, Some(origin))
            .map_err(|_| BoardError::IllegalBurn {
                from: amazons_move.destination,
                target: amazons_move.burn,
            })
    }

    /// Validates and applies a move: the queen is relocated and the burn
    /// target becomes permanently unusable.
    pub fn apply(&mut self, amazons_move: &AmazonsMove, side_to_move: Side) -> Result<(), BoardError> {
        self.validate_move(amazons_move, side_to_move)?;

        let origin = self.dimensions.index(amazons_move.origin);
        let destination = self.dimensions.index(amazons_move.destination);
        let burn = self.dimensions.index(amazons_move.burn);
        self.tiles[origin] = Tile::Empty;
        self.tiles[destination] = Tile::Queen(amazons_move.side);
        self.tiles[burn] = Tile::Burned;

        debug!("applied {} for side {}", amazons_move, amazons_move.side);
        Ok(())
    }

    /// Reports a winner using the same surrounded-queen predicate as the
    /// heuristic evaluator.
    pub fn winner(&self) -> Winner {
        rules::winner(self, &self.queens(Side::A), &self.queens(Side::B))
    }

    /// Every tile strictly after `from` up to and including `to` must be free,
    /// treating `vacated` as free even if the grid still shows a queen there.
    fn check_clear_line(
        &self,
        from: Position,
        to: Position,
        vacated: Option<Position>,
    ) -> Result<(), BoardError> {
        let d_row = to.row as i16 - from.row as i16;
        let d_col = to.col as i16 - from.col as i16;
        let straight = (d_row == 0) != (d_col == 0) || (d_row != 0 && d_row.abs() == d_col.abs());
        let direction = Direction::from_delta(d_row, d_col)
            .filter(|_| straight)
            .ok_or(BoardError::NotAStraightLine { from, to })?;

        let mut current = from;
        while current != to {
            current = direction
                .step(current, self.dimensions)
                .ok_or(BoardError::NotAStraightLine { from, to })?;
            let free = Some(current) == vacated || self.is_free(current);
            if !free {
                return Err(BoardError::PathBlocked {
                    from,
                    to,
                    blocked_at: current,
                });
            }
        }
        Ok(())
    }
}

impl Occupancy for Board {
    fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    #[inline]
    fn is_free(&self, position: Position) -> bool {
        self.dimensions.contains(position)
            && self.tiles[self.dimensions.index(position)] == Tile::Empty
    }
}
