use crate::board::position::BoardDimensions;

/// Blend of the four territory terms: king tally, queen tally, queen
/// proximity and king proximity. The four weights sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub king_tally: f64,
    pub queen_tally: f64,
    pub queen_proximity: f64,
    pub king_proximity: f64,
}

impl Weights {
    pub const CROWDED: Weights = Weights::new(0.55, 0.25, 0.10, 0.10);
    pub const CONTESTED: Weights = Weights::new(0.20, 0.20, 0.30, 0.30);
    pub const OPEN: Weights = Weights::new(0.25, 0.25, 0.25, 0.25);

    const fn new(king_tally: f64, queen_tally: f64, queen_proximity: f64, king_proximity: f64) -> Self {
        Self {
            king_tally,
            queen_tally,
            queen_proximity,
            king_proximity,
        }
    }

    /// Picks the regime from the share of tiles holding a queen or a burn.
    pub fn for_occupancy(occupied: usize, dimensions: BoardDimensions) -> Self {
        let ratio = occupied as f64 / dimensions.area() as f64;
        if ratio >= 0.45 {
            Self::CROWDED
        } else if ratio >= 0.20 {
            Self::CONTESTED
        } else {
            Self::OPEN
        }
    }
}

/// Plies during which the cheap mobility heuristic is used instead of the
/// distance fields.
pub fn few_moves_threshold(dimensions: BoardDimensions) -> u32 {
    let scaled = dimensions.area() as u32 / 12;
    scaled.max(2)
}
