//! Seams between the search tree and game-specific scoring.

use crate::snapshot::BoardSnapshot;

/// Position favorability for side A. `+∞` is a won position for side A,
/// `−∞` a won position for side B.
pub type Score = f64;

/// Scores leaf snapshots of the search tree.
pub trait Evaluator: Send + Sync {
    /// Evaluates the given snapshot. Higher scores favor side A.
    fn evaluate(&self, snapshot: &BoardSnapshot) -> Score;
}
