use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::amazons_move::{AmazonsMove, MoveParseError};
use crate::board::error::BoardError;
use crate::board::side::Side;
use crate::board::{Board, StartingPosition};
use crate::evaluate::HeuristicEvaluator;
use crate::input_handler::MoveInput;
use crate::move_generator::{MoveGenerator, MoveList};
use crate::rules::Winner;
use crate::search_tree::{Score, SearchConfig, SearchError, SearchTree};
use crate::snapshot::BoardSnapshot;

use super::session::{MatchContext, PlayerRegistry};

/// Core engine state and configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub starting_position: StartingPosition,
    pub search: SearchConfig,
    /// Seed for the evaluation tie-break; `None` picks one at random.
    pub seed: Option<u64>,
    pub players: PlayerRegistry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 2,
            starting_position: StartingPosition::default(),
            search: SearchConfig::default(),
            seed: None,
            players: PlayerRegistry::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid move: {error}")]
    InvalidMove { error: MoveParseError },
    #[error("Side {side} has no legal moves")]
    NoLegalMoves { side: Side },
    #[error("The game is over, side {winner} won")]
    GameOver { winner: Side },
    #[error("Board error: {error}")]
    Board { error: BoardError },
    #[error("Search error: {error}")]
    Search { error: SearchError },
}

impl From<BoardError> for EngineError {
    fn from(error: BoardError) -> Self {
        EngineError::Board { error }
    }
}

impl From<SearchError> for EngineError {
    fn from(error: SearchError) -> Self {
        EngineError::Search { error }
    }
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    /// Every queen of the loser is walled in.
    Surrounded { winner: Side },
    /// The side to move cannot move although the rules name no winner,
    /// which happens when both sides are walled in.
    NoLegalMoves { winner: Side },
}

impl GameEnding {
    pub fn winner(&self) -> Side {
        match self {
            GameEnding::Surrounded { winner } | GameEnding::NoLegalMoves { winner } => *winner,
        }
    }
}

/// Search performance statistics
#[derive(Debug, Clone)]
pub struct EngineStats {
    pub depth: u8,
    pub nodes_created: usize,
    pub nodes_visited: usize,
    pub leaf_evaluations: usize,
    pub cutoffs: usize,
    pub tasks_spawned: usize,
    pub max_concurrent_tasks: usize,
    pub tree_size: usize,
    pub last_score: Option<Score>,
    pub last_search_duration: Option<Duration>,
}

/// Owns the canonical board, the match session and the persistent search
/// tree, and keeps the three in step as moves are committed.
pub struct Engine {
    board: Board,
    session: MatchContext,
    tree: SearchTree,
    evaluator: HeuristicEvaluator,
    move_generator: MoveGenerator,
    search_depth: u8,
    move_history: Vec<AmazonsMove>,
}

impl Engine {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let board = Board::from_setup(&config.starting_position)?;
        let snapshot = BoardSnapshot::from_setup(&config.starting_position)?;
        let session = MatchContext::new(
            config.starting_position.starting_ply(),
            config.players,
            config.seed,
        );
        let tree = SearchTree::new(snapshot, config.search)?;
        info!(
            "engine ready: {} board, depth {}, seed {}, side A {}, side B {}",
            board.dimensions(),
            config.search_depth,
            session.seed(),
            session.players().kind(Side::A),
            session.players().kind(Side::B)
        );

        Ok(Self {
            board,
            evaluator: HeuristicEvaluator::new(session.tie_break()),
            session,
            tree,
            move_generator: MoveGenerator::default(),
            search_depth: config.search_depth,
            move_history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &MatchContext {
        &self.session
    }

    pub fn side_to_move(&self) -> Side {
        self.session.side_to_move()
    }

    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    pub fn head_snapshot(&self) -> Result<BoardSnapshot, EngineError> {
        Ok(self.tree.head_snapshot()?)
    }

    pub fn get_valid_moves(&self) -> Result<MoveList, EngineError> {
        let snapshot = self.head_snapshot()?;
        Ok(self.move_generator.generate_moves(&snapshot))
    }

    pub fn winner(&self) -> Winner {
        self.board.winner()
    }

    /// Returns the game ending if the game has ended, otherwise `None`.
    pub fn check_game_over(&self) -> Option<GameEnding> {
        if let Some(winner) = self.winner().side() {
            return Some(GameEnding::Surrounded { winner });
        }

        let side = self.side_to_move();
        let queens = self.board.queens(side);
        let stuck = queens.iter().all(|&queen| {
            self.move_generator
                .destinations(&self.board, queen)
                .is_empty()
        });
        if stuck {
            return Some(GameEnding::NoLegalMoves {
                winner: side.opposite(),
            });
        }

        None
    }

    /// Expands the search tree `depth` plies below the current position and
    /// returns the best move for the side to move.
    pub fn choose_move(&mut self, depth: u8) -> Result<AmazonsMove, EngineError> {
        if let Some(winner) = self.winner().side() {
            return Err(EngineError::GameOver { winner });
        }

        let side = self.side_to_move();
        let outcome = self
            .tree
            .search(depth, &self.evaluator)
            .map_err(|error| match error {
                SearchError::NoAvailableMoves => EngineError::NoLegalMoves { side },
                error => EngineError::Search { error },
            })?;
        debug!(
            "side {} chooses {} with score {}",
            side, outcome.best_move, outcome.score
        );
        Ok(outcome.best_move)
    }

    pub fn get_best_move(&mut self) -> Result<AmazonsMove, EngineError> {
        self.choose_move(self.search_depth)
    }

    pub fn make_best_move(&mut self) -> Result<AmazonsMove, EngineError> {
        let best_move = self.get_best_move()?;
        self.commit(best_move)?;
        Ok(best_move)
    }

    /// Validates `amazons_move` against the canonical board, applies it and
    /// moves the search tree's head along with it. Nothing changes unless
    /// both the board and the tree accept the move.
    pub fn commit(&mut self, amazons_move: AmazonsMove) -> Result<(), EngineError> {
        let side = self.side_to_move();
        self.board.validate_move(&amazons_move, side)?;
        self.tree.advance(&amazons_move)?;
        self.board.apply(&amazons_move, side)?;
        self.session.advance();
        self.move_history.push(amazons_move);
        debug!(
            "committed {} at ply {}, {} nodes kept",
            amazons_move,
            self.session.ply(),
            self.tree.len()
        );
        Ok(())
    }

    /// Like `commit`, reporting only whether the move was accepted.
    pub fn try_commit(&mut self, amazons_move: AmazonsMove) -> bool {
        match self.commit(amazons_move) {
            Ok(()) => true,
            Err(error) => {
                debug!("rejected {}: {}", amazons_move, error);
                false
            }
        }
    }

    pub fn make_move_from_input(&mut self, input: MoveInput) -> Result<AmazonsMove, EngineError> {
        match input {
            MoveInput::Notation { notation } => {
                let amazons_move = AmazonsMove::parse(self.side_to_move(), &notation)
                    .map_err(|error| EngineError::InvalidMove { error })?;
                self.commit(amazons_move)?;
                Ok(amazons_move)
            }
            MoveInput::UseEngine => self.make_best_move(),
        }
    }

    /// Root score of the most recent search.
    pub fn last_score(&self) -> Option<Score> {
        self.tree.stats().last_score()
    }

    pub fn last_move(&self) -> Option<AmazonsMove> {
        self.move_history.last().copied()
    }

    pub fn history(&self) -> &[AmazonsMove] {
        &self.move_history
    }

    pub fn get_search_stats(&self) -> EngineStats {
        let stats = self.tree.stats();
        EngineStats {
            depth: self.search_depth,
            nodes_created: stats.nodes_created(),
            nodes_visited: stats.nodes_visited(),
            leaf_evaluations: stats.leaf_evaluations(),
            cutoffs: stats.cutoffs(),
            tasks_spawned: stats.tasks_spawned(),
            max_concurrent_tasks: stats.max_concurrent_tasks(),
            tree_size: self.tree.len(),
            last_score: stats.last_score(),
            last_search_duration: stats.last_duration(),
        }
    }
}
