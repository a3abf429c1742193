use thiserror::Error;

use super::position::Position;
use super::side::Side;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: u8, cols: u8 },
    #[error("Position {position} is outside of the {rows}x{cols} board")]
    OutOfBounds { position: Position, rows: u8, cols: u8 },
    #[error("Cannot parse position {input:?}, expected `row,col`")]
    InvalidPositionNotation { input: String },
    #[error("Cannot put a piece on a tile that is already occupied: {position}")]
    TileOccupied { position: Position },
    #[error("Queen and burned tile sets overlap at {position}")]
    OverlappingPositions { position: Position },
    #[error("Invalid board layout: {msg}")]
    InvalidLayout { msg: String },
    #[error("It is side {expected}'s turn, not side {actual}'s")]
    WrongSideToMove { expected: Side, actual: Side },
    #[error("Cannot apply move, there is no side {side} queen on {position}")]
    NoQueenAtOrigin { side: Side, position: Position },
    #[error("Cannot move from {from} to {to}, tiles are not on a shared row, column or diagonal")]
    NotAStraightLine { from: Position, to: Position },
    #[error("Cannot move from {from} to {to}, the path is blocked at {blocked_at}")]
    PathBlocked {
        from: Position,
        to: Position,
        blocked_at: Position,
    },
    #[error("Cannot burn {target}, it is not reachable from {from}")]
    IllegalBurn { from: Position, target: Position },
}
