pub mod display;
pub mod engine;
pub mod game_loop;
pub mod input_source;
pub mod position_counter;
pub mod recorder;
pub mod renderer;
pub mod session;
