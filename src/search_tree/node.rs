use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::amazons_move::AmazonsMove;
use crate::board::side::Side;
use crate::snapshot::BoardSnapshot;

use super::Score;

/// Stable handle of a node inside a `NodeArena`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of a node that changes while it takes part in a search. Guarded
/// by the node's mutex since sibling direction tasks append children and
/// fold values into the same parent.
#[derive(Debug, Default)]
pub(crate) struct NodeState {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) value: Option<Score>,
    pub(crate) expansion_complete: bool,
}

pub struct SearchNode {
    snapshot: BoardSnapshot,
    origin_move: Option<AmazonsMove>,
    state: Mutex<NodeState>,
}

impl SearchNode {
    pub(crate) fn new(
        snapshot: BoardSnapshot,
        origin_move: Option<AmazonsMove>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            snapshot,
            origin_move,
            state: Mutex::new(NodeState {
                parent,
                ..NodeState::default()
            }),
        }
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// The move that led here from the parent, `None` for a fresh root.
    pub fn origin_move(&self) -> Option<AmazonsMove> {
        self.origin_move
    }

    pub fn side_to_move(&self) -> Side {
        self.snapshot.side_to_move()
    }

    pub fn value(&self) -> Option<Score> {
        self.lock().value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.lock().parent
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.lock().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.lock().children.len()
    }

    /// True once every move of this node has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.lock().expansion_complete
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resets the running value to the side's starting bound and returns the
    /// current children plus whether their generation previously finished.
    pub(crate) fn begin_expansion(&self) -> (Vec<NodeId>, bool) {
        let mut state = self.lock();
        state.value = Some(self.side_to_move().initial_bound());
        (state.children.clone(), state.expansion_complete)
    }

    pub(crate) fn finish_generation(&self, complete: bool) {
        self.lock().expansion_complete = complete;
    }

    pub(crate) fn add_child(&self, child: NodeId) {
        self.lock().children.push(child);
    }

    pub(crate) fn store_value(&self, value: Score) {
        self.lock().value = Some(value);
    }

    /// Cuts the parent link when this node becomes the head.
    pub(crate) fn detach(&self) {
        self.lock().parent = None;
    }
}

impl fmt::Debug for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchNode")
            .field("ply", &self.snapshot.ply())
            .field("origin_move", &self.origin_move)
            .field("state", &*self.lock())
            .finish()
    }
}
