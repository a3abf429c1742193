use std::str::FromStr;

use super::error::BoardError;
use super::position::{BoardDimensions, Position};
use super::side::Side;
use super::{Board, Tile};

/// Everything the engine needs to know about a match before the first move.
#[derive(Clone, Debug, PartialEq)]
pub struct StartingPosition {
    pub dimensions: BoardDimensions,
    pub side_a: Vec<Position>,
    pub side_b: Vec<Position>,
    pub burned: Vec<Position>,
    pub side_to_move: Side,
}

impl StartingPosition {
    /// 10x10 board, four queens for side A along the bottom half and six for side B.
    pub fn standard() -> Self {
        Self {
            dimensions: BoardDimensions { rows: 10, cols: 10 },
            side_a: vec![
                Position::new(6, 0),
                Position::new(6, 9),
                Position::new(9, 3),
                Position::new(9, 6),
            ],
            side_b: vec![
                Position::new(0, 3),
                Position::new(0, 6),
                Position::new(3, 0),
                Position::new(3, 9),
                Position::new(0, 0),
                Position::new(0, 1),
            ],
            burned: Vec::new(),
            side_to_move: Side::A,
        }
    }

    /// 6x6 board with two queens per side.
    pub fn small() -> Self {
        Self {
            dimensions: BoardDimensions { rows: 6, cols: 6 },
            side_a: vec![Position::new(2, 0), Position::new(3, 5)],
            side_b: vec![Position::new(0, 3), Position::new(5, 2)],
            burned: Vec::new(),
            side_to_move: Side::A,
        }
    }

    /// Reads the queens and burned tiles off an existing board.
    pub fn from_board(board: &Board, side_to_move: Side) -> Self {
        Self {
            dimensions: board.dimensions(),
            side_a: board.queens(Side::A),
            side_b: board.queens(Side::B),
            burned: board.burned(),
            side_to_move,
        }
    }

    /// The absolute ply the match starts at, so that ply parity matches the side to move.
    pub fn starting_ply(&self) -> u32 {
        match self.side_to_move {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl Default for StartingPosition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Accepts `standard`, `small`, or a `ROWSxCOLS:layout` string such as
/// `3x3:a../.x./..b`, optionally suffixed with `@b` to give side B the move.
impl FromStr for StartingPosition {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (layout, side_to_move) = match input.rsplit_once('@') {
            Some((layout, side)) => (
                layout,
                side.parse::<Side>().map_err(|msg| BoardError::InvalidLayout {
                    msg: msg.to_string(),
                })?,
            ),
            None => (input, Side::A),
        };

        let mut setup = match layout.trim() {
            "standard" => Self::standard(),
            "small" => Self::small(),
            custom => {
                let invalid = || BoardError::InvalidLayout {
                    msg: format!("expected `standard`, `small` or ROWSxCOLS:layout, got {:?}", custom),
                };
                let (size, layout) = custom.split_once(':').ok_or_else(invalid)?;
                let (rows, cols) = size.split_once('x').ok_or_else(invalid)?;
                let rows = rows.trim().parse::<u8>().map_err(|_| invalid())?;
                let cols = cols.trim().parse::<u8>().map_err(|_| invalid())?;
                Self::from_board(&Board::from_layout(rows, cols, layout)?, Side::A)
            }
        };
        setup.side_to_move = side_to_move;
        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_build_boards() {
        let standard = Board::from_setup(&StartingPosition::standard()).unwrap();
        assert_eq!(standard.queens(Side::A).len(), 4);
        assert_eq!(standard.queens(Side::B).len(), 6);

        let small = Board::from_setup(&StartingPosition::small()).unwrap();
        assert_eq!(small.get(Position::new(2, 0)).unwrap(), Tile::Queen(Side::A));
        assert_eq!(small.get(Position::new(5, 2)).unwrap(), Tile::Queen(Side::B));
    }

    #[test]
    fn test_parse_presets_and_layouts() {
        assert_eq!("small".parse::<StartingPosition>().unwrap(), StartingPosition::small());

        let custom: StartingPosition = "3x3:a../.x./..b@b".parse().unwrap();
        assert_eq!(custom.side_a, vec![Position::new(0, 0)]);
        assert_eq!(custom.side_b, vec![Position::new(2, 2)]);
        assert_eq!(custom.burned, vec![Position::new(1, 1)]);
        assert_eq!(custom.side_to_move, Side::B);
        assert_eq!(custom.starting_ply(), 1);

        assert!("huge".parse::<StartingPosition>().is_err());
        assert!("2x2:a..".parse::<StartingPosition>().is_err());
    }

    #[test]
    fn test_overlapping_setup_is_rejected() {
        let mut setup = StartingPosition::small();
        setup.side_b.push(Position::new(2, 0));
        assert_eq!(
            Board::from_setup(&setup),
            Err(BoardError::TileOccupied {
                position: Position::new(2, 0)
            })
        );
    }

    #[test]
    fn test_out_of_bounds_setup_is_rejected() {
        let mut setup = StartingPosition::small();
        setup.burned.push(Position::new(6, 6));
        assert!(matches!(
            Board::from_setup(&setup),
            Err(BoardError::OutOfBounds { .. })
        ));
    }
}
