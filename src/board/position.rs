use std::fmt;
use std::str::FromStr;

use super::error::BoardError;

/// A tile on the board, addressed by zero-based row and column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidPositionNotation {
            input: input.to_string(),
        };
        let (row, col) = input.trim().split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<u8>().map_err(|_| invalid())?;
        let col = col.trim().parse::<u8>().map_err(|_| invalid())?;
        Ok(Position::new(row, col))
    }
}

/// Size of the rectangular grid every position is checked against.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BoardDimensions {
    pub(super) rows: u8,
    pub(super) cols: u8,
}

impl BoardDimensions {
    pub fn new(rows: u8, cols: u8) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn area(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Builds a position, failing if it falls outside the board.
    pub fn position(&self, row: u8, col: u8) -> Result<Position, BoardError> {
        let position = Position::new(row, col);
        self.check(position)?;
        Ok(position)
    }

    pub fn check(&self, position: Position) -> Result<(), BoardError> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Row-major index of an in-bounds position.
    #[inline]
    pub fn index(&self, position: Position) -> usize {
        debug_assert!(self.contains(position), "{} is off the board", position);
        position.row as usize * self.cols as usize + position.col as usize
    }

    /// Offsets a position by a signed delta, returning `None` past the edge.
    #[inline]
    pub fn offset(&self, position: Position, d_row: i16, d_col: i16) -> Option<Position> {
        let row = position.row as i16 + d_row;
        let col = position.col as i16 + d_col;
        if row < 0 || col < 0 || row >= self.rows as i16 || col >= self.cols as i16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for BoardDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!("2,3".parse::<Position>().unwrap(), Position::new(2, 3));
        assert_eq!(" 9 , 0 ".parse::<Position>().unwrap(), Position::new(9, 0));
        assert!("2;3".parse::<Position>().is_err());
        assert!("-1,3".parse::<Position>().is_err());
    }

    #[test]
    fn test_bounds() {
        let dims = BoardDimensions::new(6, 6).unwrap();
        assert!(dims.position(5, 5).is_ok());
        assert!(matches!(
            dims.position(6, 0),
            Err(BoardError::OutOfBounds { .. })
        ));
        assert!(BoardDimensions::new(0, 4).is_err());
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let dims = BoardDimensions::new(6, 4).unwrap();
        let corner = Position::new(0, 3);
        assert_eq!(dims.offset(corner, -1, 0), None);
        assert_eq!(dims.offset(corner, 0, 1), None);
        assert_eq!(dims.offset(corner, 1, -1), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_positions_cover_board_in_row_major_order() {
        let dims = BoardDimensions::new(2, 3).unwrap();
        let all: Vec<_> = dims.positions().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[4], Position::new(1, 1));
        assert_eq!(dims.index(all[4]), 4);
    }
}
