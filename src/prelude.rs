//! Common types re-exported for convenience.

pub use crate::amazons_move::AmazonsMove;
pub use crate::board::position::{BoardDimensions, Position};
pub use crate::board::side::Side;
pub use crate::board::{Board, StartingPosition, Tile};
pub use crate::evaluate::HeuristicEvaluator;
pub use crate::game::engine::{Engine, EngineConfig, EngineError};
pub use crate::rules::Winner;
pub use crate::search_tree::{Evaluator, Score, SearchConfig, SearchTree};
pub use crate::snapshot::BoardSnapshot;
