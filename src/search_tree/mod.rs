//! Persistent game tree searched with depth-bounded minimax.
//!
//! The tree lives in a `NodeArena` and survives between moves: after a move
//! is committed the matching child becomes the new head, keeping whatever was
//! already expanded below it, and everything else is released.

pub mod arena;
pub mod controller;
pub mod minimax;
pub mod node;
pub mod scheduler;
pub mod stats;
pub mod traits;


use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::amazons_move::AmazonsMove;
use crate::move_generator::MoveGenerator;
use crate::snapshot::BoardSnapshot;

pub use arena::NodeArena;
pub use node::{NodeId, SearchNode};
pub use scheduler::Scheduler;
pub use stats::SearchStats;
pub use traits::{Evaluator, Score};

use controller::Expansion;
use minimax::is_better;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("node {id} is not in the search tree")]
    UnknownNode { id: NodeId },
    #[error("move {amazons_move} is not legal in the current position")]
    IllegalMove { amazons_move: AmazonsMove },
    #[error("failed to start the search thread pool: {msg}")]
    ThreadPool { msg: String },
}

/// How expansion work is scheduled and whether cutoffs are taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Expand queens and directions on a rayon pool.
    pub parallel: bool,
    /// Stop a direction's enumeration when the grandparent cannot benefit.
    pub pruning: bool,
    /// Worker threads for the pool; 0 lets rayon decide.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            pruning: true,
            threads: 0,
        }
    }
}

impl SearchConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// The move chosen by a search and the value backed up to the head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best_move: AmazonsMove,
    pub score: Score,
    pub node: NodeId,
}

pub struct SearchTree {
    arena: NodeArena,
    head: NodeId,
    config: SearchConfig,
    scheduler: Scheduler,
    generator: MoveGenerator,
    stats: SearchStats,
}

impl SearchTree {
    pub fn new(snapshot: BoardSnapshot, config: SearchConfig) -> Result<Self, SearchError> {
        let scheduler = Scheduler::new(&config)?;
        let arena = NodeArena::new();
        let head = arena.insert(SearchNode::new(snapshot, None, None));
        Ok(Self {
            arena,
            head,
            config,
            scheduler,
            generator: MoveGenerator::new(),
            stats: SearchStats::new(),
        })
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn head_node(&self) -> Result<Arc<SearchNode>, SearchError> {
        self.node(self.head)
    }

    pub fn head_snapshot(&self) -> Result<BoardSnapshot, SearchError> {
        Ok(self.head_node()?.snapshot().clone())
    }

    pub fn node(&self, id: NodeId) -> Result<Arc<SearchNode>, SearchError> {
        self.arena.get(id).ok_or(SearchError::UnknownNode { id })
    }

    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, SearchError> {
        Ok(self.node(id)?.children())
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of live nodes, which is the head's subtree size after an advance.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Expands the node `id` by `depth` plies and returns its backed-up value.
    pub fn expand<E: Evaluator>(
        &self,
        id: NodeId,
        depth: i32,
        evaluator: &E,
    ) -> Result<Score, SearchError> {
        let node = self.node(id)?;
        let expansion = Expansion {
            arena: &self.arena,
            evaluator,
            scheduler: &self.scheduler,
            stats: &self.stats,
            generator: self.generator,
            pruning: self.config.pruning,
        };
        Ok(self
            .scheduler
            .install(|| expansion.expand(id, &node, depth)))
    }

    /// The child of `id` with the best value for the side to move there.
    /// Ties go to the child created first.
    pub fn best_child(&self, id: NodeId) -> Result<Option<(NodeId, AmazonsMove, Score)>, SearchError> {
        let node = self.node(id)?;
        let side = node.side_to_move();
        let mut best: Option<(NodeId, AmazonsMove, Score)> = None;

        for child_id in node.children() {
            let child = match self.arena.get(child_id) {
                Some(child) => child,
                None => continue,
            };
            let (origin_move, value) = match (child.origin_move(), child.value()) {
                (Some(origin_move), Some(value)) => (origin_move, value),
                _ => continue,
            };
            let replace = match best {
                None => true,
                Some((_, _, best_value)) => is_better(side, value, best_value),
            };
            if replace {
                best = Some((child_id, origin_move, value));
            }
        }

        Ok(best)
    }

    /// Expands the head to `depth` plies and returns its best move.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn search<E: Evaluator>(&mut self, depth: u8, evaluator: &E) -> Result<SearchOutcome, SearchError> {
        if depth < 1 {
            return Err(SearchError::DepthTooLow);
        }

        self.stats.reset();
        let started = Instant::now();
        let score = self.expand(self.head, i32::from(depth), evaluator)?;
        let duration = started.elapsed();
        self.stats.record_result(score, duration);

        let (node, best_move, child_score) = self
            .best_child(self.head)?
            .ok_or(SearchError::NoAvailableMoves)?;

        info!(
            "depth {} search chose {} ({}) in {:?}, {} nodes created, {} cutoffs",
            depth,
            best_move,
            child_score,
            duration,
            self.stats.nodes_created(),
            self.stats.cutoffs()
        );

        Ok(SearchOutcome {
            best_move,
            score,
            node,
        })
    }

    /// Makes the child reached by `amazons_move` the new head, creating it
    /// when the head was never expanded that far, and releases every node
    /// that is no longer reachable. An illegal move leaves the tree untouched.
    pub fn advance(&mut self, amazons_move: &AmazonsMove) -> Result<NodeId, SearchError> {
        let head = self.head_node()?;
        if !head.snapshot().is_legal(amazons_move) {
            return Err(SearchError::IllegalMove {
                amazons_move: *amazons_move,
            });
        }

        let reused = head.children().into_iter().find(|&child_id| {
            self.arena
                .get(child_id)
                .and_then(|child| child.origin_move())
                .map_or(false, |origin_move| origin_move == *amazons_move)
        });

        let new_head = match reused {
            Some(child_id) => child_id,
            None => {
                let snapshot = head.snapshot().apply(amazons_move);
                self.arena
                    .insert(SearchNode::new(snapshot, Some(*amazons_move), None))
            }
        };
        self.node(new_head)?.detach();
        self.head = new_head;

        let released = self.arena.retain_reachable(new_head);
        debug!(
            "advanced head to {} via {} ({}), released {} nodes, {} remain",
            new_head,
            amazons_move,
            if reused.is_some() { "reused" } else { "fresh" },
            released,
            self.arena.len()
        );

        Ok(new_head)
    }
}
