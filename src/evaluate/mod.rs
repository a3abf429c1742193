use crate::board::position::Position;
use crate::board::side::Side;
use crate::move_generator::ray::Occupancy;
use crate::move_generator::MoveGenerator;
use crate::rules::Winner;
use crate::search_tree::{Evaluator, Score};
use crate::snapshot::BoardSnapshot;

use self::distance::{DistanceField, Metric, UNREACHABLE};
use self::weights::{few_moves_threshold, Weights};

pub mod distance;
pub mod weights;


const SIDE_A_WINS: Score = Score::INFINITY;
const SIDE_B_WINS: Score = Score::NEG_INFINITY;

const MOBILITY_WEIGHT: f64 = 0.65;
const OPPONENT_MOBILITY_WEIGHT: f64 = 0.35;

/// King-distance gaps at or beyond this many steps count as fully owned.
const PROXIMITY_SPAN: f64 = 6.0;

/// Tie-break used when no session supplies one.
pub const DEFAULT_TIE_BREAK: f64 = 0.15;

/// Scores snapshots for side A: a cheap mobility count in the opening, a
/// territory estimate built from distance fields afterwards.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicEvaluator {
    tie_break: f64,
    generator: MoveGenerator,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_BREAK)
    }
}

impl HeuristicEvaluator {
    /// `tie_break` is credited to a tile both sides reach in the same number of steps.
    pub fn new(tie_break: f64) -> Self {
        Self {
            tie_break,
            generator: MoveGenerator::new(),
        }
    }

    pub fn tie_break(&self) -> f64 {
        self.tie_break
    }

    pub fn score(&self, snapshot: &BoardSnapshot) -> Score {
        if let Some(score) = terminal_score(snapshot) {
            return score;
        }

        if snapshot.ply() < few_moves_threshold(snapshot.dimensions()) {
            self.mobility_score(snapshot)
        } else {
            self.territory_score(snapshot)
        }
    }

    /// `0.65·movesA − 0.35·movesB`, counting relocations only.
    pub fn mobility_score(&self, snapshot: &BoardSnapshot) -> Score {
        let moves_a = self
            .generator
            .count_destinations(snapshot, snapshot.queens(Side::A));
        let moves_b = self
            .generator
            .count_destinations(snapshot, snapshot.queens(Side::B));
        MOBILITY_WEIGHT * moves_a as f64 - OPPONENT_MOBILITY_WEIGHT * moves_b as f64
    }

    pub fn territory_score(&self, snapshot: &BoardSnapshot) -> Score {
        let terms = self.territory_terms(snapshot);
        let weights = Weights::for_occupancy(snapshot.occupied_count(), snapshot.dimensions());
        weights.king_tally * terms.king_tally
            + weights.queen_tally * terms.queen_tally
            + weights.queen_proximity * terms.queen_proximity
            + weights.king_proximity * terms.king_proximity
    }

    /// The four unweighted territory terms over every free tile.
    pub fn territory_terms(&self, snapshot: &BoardSnapshot) -> TerritoryTerms {
        let king_a = DistanceField::compute(snapshot, snapshot.queens(Side::A), Metric::King);
        let king_b = DistanceField::compute(snapshot, snapshot.queens(Side::B), Metric::King);
        let queen_a = DistanceField::compute(snapshot, snapshot.queens(Side::A), Metric::Queen);
        let queen_b = DistanceField::compute(snapshot, snapshot.queens(Side::B), Metric::Queen);

        let mut terms = TerritoryTerms::default();
        let free_tiles = snapshot
            .dimensions()
            .positions()
            .filter(|&position| snapshot.is_free(position));

        for position in free_tiles {
            let (king_a, king_b) = (king_a.get(position), king_b.get(position));
            let (queen_a, queen_b) = (queen_a.get(position), queen_b.get(position));

            terms.king_tally += self.ownership(king_a, king_b);
            terms.queen_tally += self.ownership(queen_a, queen_b);
            terms.queen_proximity += 2.0 * (decay(queen_a) - decay(queen_b));
            terms.king_proximity += proximity(king_a, king_b);
        }

        terms
    }

    fn ownership(&self, distance_a: u32, distance_b: u32) -> f64 {
        if distance_a < distance_b {
            1.0
        } else if distance_b < distance_a {
            -1.0
        } else if distance_a == UNREACHABLE {
            0.0
        } else {
            self.tie_break
        }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, snapshot: &BoardSnapshot) -> Score {
        self.score(snapshot)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerritoryTerms {
    pub king_tally: f64,
    pub queen_tally: f64,
    pub queen_proximity: f64,
    pub king_proximity: f64,
}

/// `±∞` once one side has no free queen left, using the same predicate as
/// the board's winner check.
pub fn terminal_score(snapshot: &BoardSnapshot) -> Option<Score> {
    match snapshot.winner() {
        Winner::SideAWins => Some(SIDE_A_WINS),
        Winner::SideBWins => Some(SIDE_B_WINS),
        Winner::NoWinner => None,
    }
}

fn decay(distance: u32) -> f64 {
    if distance == UNREACHABLE {
        0.0
    } else {
        0.5f64.powi(distance as i32)
    }
}

fn proximity(distance_a: u32, distance_b: u32) -> f64 {
    match (distance_a == UNREACHABLE, distance_b == UNREACHABLE) {
        (true, true) => 0.0,
        (true, false) => -1.0,
        (false, true) => 1.0,
        (false, false) => {
            let gap = (distance_b as f64 - distance_a as f64) / PROXIMITY_SPAN;
            gap.clamp(-1.0, 1.0)
        }
    }
}

/// Free tiles `side` reaches in fewer king steps than its opponent.
pub fn owned_tiles(snapshot: &BoardSnapshot, side: Side) -> Vec<Position> {
    let own = DistanceField::compute(snapshot, snapshot.queens(side), Metric::King);
    let other = DistanceField::compute(snapshot, snapshot.queens(side.opposite()), Metric::King);
    snapshot
        .dimensions()
        .positions()
        .filter(|&position| snapshot.is_free(position) && own.get(position) < other.get(position))
        .collect()
}
