//! Depth-bounded expansion of search nodes.
//!
//! A node is expanded by generating its moves queen by queen and direction by
//! direction. Each move gets a child node, the child is expanded one ply
//! shallower and its value is folded into the node before the next move of
//! the same direction is produced. Folding may report a cutoff, which stops
//! that direction's enumeration and leaves the node incomplete.
//!
//! Children survive between searches. A node whose generation finished is
//! re-expanded by recursing into its existing children; an incomplete node
//! regenerates its moves and only creates children for moves that are not
//! yet present.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;
use rustc_hash::FxHashMap;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::amazons_move::AmazonsMove;
use crate::evaluate::terminal_score;
use crate::move_generator::{Direction, MoveGenerator};

use super::arena::NodeArena;
use super::minimax::fold_child;
use super::node::{NodeId, SearchNode};
use super::scheduler::Scheduler;
use super::stats::SearchStats;
use super::{Evaluator, Score};

/// One expansion pass over the arena, carrying everything the recursive
/// steps share.
pub(crate) struct Expansion<'a, E: Evaluator> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) evaluator: &'a E,
    pub(crate) scheduler: &'a Scheduler,
    pub(crate) stats: &'a SearchStats,
    pub(crate) generator: MoveGenerator,
    pub(crate) pruning: bool,
}

impl<'a, E: Evaluator> Expansion<'a, E> {
    /// Expands `node` to `additional_depth` more plies and returns its value.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub(crate) fn expand(&self, id: NodeId, node: &SearchNode, additional_depth: i32) -> Score {
        self.stats.increment_visited();

        if additional_depth <= 0 {
            return self.evaluate_leaf(node);
        }

        if let Some(score) = terminal_score(node.snapshot()) {
            node.store_value(score);
            return score;
        }

        let (children, complete) = node.begin_expansion();
        if complete && !children.is_empty() {
            self.expand_children(node, &children, additional_depth);
        } else {
            self.generate_children(id, node, &children, additional_depth);
        }

        node.value()
            .unwrap_or_else(|| node.side_to_move().initial_bound())
    }

    /// Scores a node at the depth horizon. Nodes that already have children
    /// keep the value their subtree produced.
    fn evaluate_leaf(&self, node: &SearchNode) -> Score {
        {
            let state = node.lock();
            if let Some(value) = state.value {
                return value;
            }
        }

        let score = self.evaluator.evaluate(node.snapshot());
        self.stats.increment_leaf_evaluations();
        node.store_value(score);
        score
    }

    /// Memoized path: every move already has a child, so recurse into them.
    fn expand_children(&self, node: &SearchNode, children: &[NodeId], additional_depth: i32) {
        let flow = self.scheduler.fan_out_until(children, self.stats, |&child_id| {
            match self.arena.get(child_id) {
                Some(child) => {
                    let value = self.expand(child_id, &child, additional_depth - 1);
                    fold_child(self.arena, node, value, self.pruning, self.stats)
                }
                None => ControlFlow::Continue(()),
            }
        });
        if flow.is_break() {
            trace!("memoized children cut at ply {}", node.snapshot().ply());
        }
    }

    /// Generates every move of the side to move, reusing children that
    /// already exist for a move and spawning the rest.
    fn generate_children(
        &self,
        id: NodeId,
        node: &SearchNode,
        existing: &[NodeId],
        additional_depth: i32,
    ) {
        let snapshot = node.snapshot();
        let side = snapshot.side_to_move();
        let existing: FxHashMap<AmazonsMove, NodeId> = existing
            .iter()
            .filter_map(|&child_id| {
                let child = self.arena.get(child_id)?;
                child.origin_move().map(|origin_move| (origin_move, child_id))
            })
            .collect();
        let cut = AtomicBool::new(false);

        self.scheduler.fan_out(snapshot.queens(side), self.stats, |&queen| {
            self.scheduler.fan_out(&Direction::ALL, self.stats, |&direction| {
                let flow = self.generator.for_each_move_in_direction(
                    snapshot,
                    side,
                    queen,
                    direction,
                    |amazons_move| {
                        let child_id = match existing.get(&amazons_move) {
                            Some(&child_id) => child_id,
                            None => self.spawn_child(id, node, amazons_move),
                        };
                        match self.arena.get(child_id) {
                            Some(child) => {
                                let value = self.expand(child_id, &child, additional_depth - 1);
                                fold_child(self.arena, node, value, self.pruning, self.stats)
                            }
                            None => ControlFlow::Continue(()),
                        }
                    },
                );
                if flow.is_break() {
                    cut.store(true, Ordering::Relaxed);
                }
            });
        });

        node.finish_generation(!cut.load(Ordering::Relaxed));
    }

    fn spawn_child(&self, parent_id: NodeId, parent: &SearchNode, amazons_move: AmazonsMove) -> NodeId {
        let snapshot = parent.snapshot().apply(&amazons_move);
        let child_id = self
            .arena
            .insert(SearchNode::new(snapshot, Some(amazons_move), Some(parent_id)));
        parent.add_child(child_id);
        self.stats.increment_created();
        child_id
    }
}
