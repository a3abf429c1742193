use core::fmt;

use crate::board::position::{BoardDimensions, Position};

#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Direction {
    East,
    North,
    NorthEast,
    NorthWest,
    South,
    SouthEast,
    SouthWest,
    West,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::North,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
    ];

    /// Row/column delta of a single step. Row 0 is the top (north) edge.
    #[rustfmt::skip]
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::North     => (-1,  0),
            Direction::South     => ( 1,  0),
            Direction::East      => ( 0,  1),
            Direction::West      => ( 0, -1),
            Direction::NorthEast => (-1,  1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => ( 1,  1),
            Direction::SouthWest => ( 1, -1),
        }
    }

    /// The direction of a unit step, if the delta is one.
    pub fn from_delta(d_row: i16, d_col: i16) -> Option<Direction> {
        Self::ALL
            .iter()
            .copied()
            .find(|dir| dir.delta() == (d_row.signum(), d_col.signum()))
            .filter(|_| d_row != 0 || d_col != 0)
    }

    #[inline]
    pub fn step(&self, from: Position, dimensions: BoardDimensions) -> Option<Position> {
        let (d_row, d_col) = self.delta();
        dimensions.offset(from, d_row, d_col)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dir = match self {
            Direction::East => "East",
            Direction::North => "North",
            Direction::NorthEast => "NorthEast",
            Direction::NorthWest => "NorthWest",
            Direction::South => "South",
            Direction::SouthEast => "SouthEast",
            Direction::SouthWest => "SouthWest",
            Direction::West => "West",
        };
        write!(f, "{}", dir)
    }
}

/// Anything that can answer "is this tile free to move through".
pub trait Occupancy {
    fn dimensions(&self) -> BoardDimensions;

    /// True when the tile holds no queen and is not burned.
    fn is_free(&self, position: Position) -> bool;
}

/// An occupancy view with one queen moved from `origin` to `destination`.
/// Burn targets are enumerated against this view.
pub struct Relocated<'a, O: ?Sized> {
    base: &'a O,
    origin: Position,
    destination: Position,
}

impl<'a, O: Occupancy + ?Sized> Relocated<'a, O> {
    pub fn new(base: &'a O, origin: Position, destination: Position) -> Self {
        Self {
            base,
            origin,
            destination,
        }
    }
}

impl<'a, O: Occupancy + ?Sized> Occupancy for Relocated<'a, O> {
    fn dimensions(&self) -> BoardDimensions {
        self.base.dimensions()
    }

    #[inline]
    fn is_free(&self, position: Position) -> bool {
        if position == self.destination {
            false
        } else if position == self.origin {
            true
        } else {
            self.base.is_free(position)
        }
    }
}

/// Walks outward from a tile, yielding every free tile until the first
/// queen, burned tile or board edge. The starting tile is never yielded.
pub struct Ray<'a, O: ?Sized> {
    occupancy: &'a O,
    dimensions: BoardDimensions,
    current: Position,
    direction: Direction,
    blocked: bool,
}

impl<'a, O: Occupancy + ?Sized> Iterator for Ray<'a, O> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.blocked {
            return None;
        }
        match self.direction.step(self.current, self.dimensions) {
            Some(next) if self.occupancy.is_free(next) => {
                self.current = next;
                Some(next)
            }
            _ => {
                self.blocked = true;
                None
            }
        }
    }
}

pub fn ray<O: Occupancy + ?Sized>(occupancy: &O, from: Position, direction: Direction) -> Ray<'_, O> {
    Ray {
        occupancy,
        dimensions: occupancy.dimensions(),
        current: from,
        direction,
        blocked: false,
    }
}
