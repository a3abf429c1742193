use super::{Board, Tile};
use crate::board::side::Side;
use std::fmt;

impl Tile {
    pub fn to_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Queen(Side::A) => 'a',
            Tile::Queen(Side::B) => 'b',
            Tile::Burned => 'x',
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            'a' | 'A' => Some(Tile::Queen(Side::A)),
            'b' | 'B' => Some(Tile::Queen(Side::B)),
            'x' | 'X' => Some(Tile::Burned),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dims = self.dimensions();
        write!(f, "   ")?;
        for col in 0..dims.cols() {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..dims.rows() {
            write!(f, "{:>2} ", row)?;
            for col in 0..dims.cols() {
                let tile = self.tiles[row as usize * dims.cols() as usize + col as usize];
                write!(f, " {}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builds a `Board` from a grid of tiles: `.` empty, `a` side A queen,
/// `b` side B queen, `x` burned. Rows are read top to bottom.
#[macro_export]
macro_rules! amazons_position {
    ($rows:literal, $cols:literal; $($tile:tt)*) => {{
        // Convert all input tokens to a string and filter out whitespace characters.
        let layout: String = stringify!($($tile)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        $crate::board::Board::from_layout($rows, $cols, &layout)
            .expect("invalid amazons position")
    }};
}

#[cfg(test)]
mod tests {
    use crate::board::position::Position;
    use crate::board::side::Side;
    use crate::board::Tile;

    #[test]
    fn test_macro_places_tiles() {
        let board = amazons_position! { 3, 4;
            a..b
            .x..
            ....
        };
        assert_eq!(board.get(Position::new(0, 0)).unwrap(), Tile::Queen(Side::A));
        assert_eq!(board.get(Position::new(0, 3)).unwrap(), Tile::Queen(Side::B));
        assert_eq!(board.get(Position::new(1, 1)).unwrap(), Tile::Burned);
        assert_eq!(board.get(Position::new(2, 2)).unwrap(), Tile::Empty);
    }

    #[test]
    fn test_display() {
        let board = amazons_position! { 2, 2;
            a.
            xb
        };
        let rendered = board.to_string();
        assert_eq!(rendered, "    0 1\n 0  a .\n 1  x b\n");
    }
}
