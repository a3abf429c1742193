pub mod amazons_move;
pub mod board;
pub mod evaluate;
pub mod game;
pub mod input_handler;
pub mod move_generator;
pub mod prelude;
pub mod rules;
pub mod search_tree;
pub mod snapshot;

#[cfg(feature = "instrumentation")]
pub mod instrumentation;
