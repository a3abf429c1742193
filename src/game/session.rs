//! Per-match state shared by the engine and the game loop: the ply counter,
//! who controls each side, and the seeded tie-break used by evaluation.

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::side::Side;

const TIE_BREAK_MIN: f64 = 0.1;
const TIE_BREAK_MAX: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Engine,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Engine => write!(f, "engine"),
        }
    }
}

/// Who moves for each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerRegistry {
    side_a: PlayerKind,
    side_b: PlayerKind,
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::engines()
    }
}

impl PlayerRegistry {
    pub fn new(side_a: PlayerKind, side_b: PlayerKind) -> Self {
        Self { side_a, side_b }
    }

    pub fn engines() -> Self {
        Self::new(PlayerKind::Engine, PlayerKind::Engine)
    }

    /// A human on `human_side` against the engine.
    pub fn human_against_engine(human_side: Side) -> Self {
        match human_side {
            Side::A => Self::new(PlayerKind::Human, PlayerKind::Engine),
            Side::B => Self::new(PlayerKind::Engine, PlayerKind::Human),
        }
    }

    pub fn kind(&self, side: Side) -> PlayerKind {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b,
        }
    }
}

/// Match bookkeeping. The tie-break is drawn once from `seed`, so two
/// sessions with the same seed evaluate identically.
#[derive(Clone, Debug)]
pub struct MatchContext {
    ply: u32,
    players: PlayerRegistry,
    seed: u64,
    tie_break: f64,
}

impl MatchContext {
    /// `seed` of `None` draws a fresh one; it stays readable via `seed()`.
    pub fn new(starting_ply: u32, players: PlayerRegistry, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = StdRng::seed_from_u64(seed);
        let tie_break = draw_tie_break(&mut rng);
        debug!("match seed {} gives tie-break {:.4}", seed, tie_break);

        Self {
            ply: starting_ply,
            players,
            seed,
            tie_break,
        }
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn side_to_move(&self) -> Side {
        Side::for_ply(self.ply)
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn current_player(&self) -> PlayerKind {
        self.players.kind(self.side_to_move())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tie_break(&self) -> f64 {
        self.tie_break
    }

    /// Hands the turn to the other side.
    pub fn advance(&mut self) {
        self.ply += 1;
    }
}

fn draw_tie_break(rng: &mut StdRng) -> f64 {
    let magnitude = rng.gen_range(TIE_BREAK_MIN..=TIE_BREAK_MAX);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}
