pub mod generator;
pub mod ray;

pub use generator::{MoveGenerator, MoveList, TargetList};
pub use ray::{Direction, Occupancy};
