//! Node storage addressed by stable handles.

use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::{FxHashSet, FxHasher};

use super::node::{NodeId, SearchNode};

type NodeMap = DashMap<NodeId, Arc<SearchNode>, BuildHasherDefault<FxHasher>>;

/// Every live node of the search tree. Handles stay valid until the node is
/// released by `retain_reachable`; lookups of released handles return `None`.
pub struct NodeArena {
    nodes: NodeMap,
    next_id: AtomicU64,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: NodeMap::with_hasher(Default::default()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn insert(&self, node: SearchNode) -> NodeId {
        let id = NodeId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.nodes.insert(id, Arc::new(node));
        id
    }

    /// Clones the node out so no map guard is held while the caller recurses.
    pub fn get(&self, id: NodeId) -> Option<Arc<SearchNode>> {
        self.nodes.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of `root` and all of its descendants.
    pub fn reachable_from(&self, root: NodeId) -> FxHashSet<NodeId> {
        let mut reachable = FxHashSet::default();
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.get(id) {
                if reachable.insert(id) {
                    pending.extend(node.children());
                }
            }
        }
        reachable
    }

    /// Releases every node not reachable from `root`. Returns how many were released.
    pub fn retain_reachable(&self, root: NodeId) -> usize {
        let reachable = self.reachable_from(root);
        let before = self.nodes.len();
        self.nodes.retain(|id, _| reachable.contains(id));
        before - self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartingPosition;
    use crate::snapshot::BoardSnapshot;

    fn node(parent: Option<NodeId>) -> SearchNode {
        let snapshot = BoardSnapshot::from_setup(&StartingPosition::small()).unwrap();
        SearchNode::new(snapshot, None, parent)
    }

    #[test]
    fn test_insert_and_get() {
        let arena = NodeArena::new();
        let a = arena.insert(node(None));
        let b = arena.insert(node(Some(a)));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).unwrap().parent(), Some(a));
    }

    #[test]
    fn test_retain_reachable_releases_siblings() {
        let arena = NodeArena::new();
        let root = arena.insert(node(None));
        let kept = arena.insert(node(Some(root)));
        let dropped = arena.insert(node(Some(root)));
        let grandchild = arena.insert(node(Some(kept)));
        let orphaned = arena.insert(node(Some(dropped)));

        let root_node = arena.get(root).unwrap();
        root_node.add_child(kept);
        root_node.add_child(dropped);
        arena.get(kept).unwrap().add_child(grandchild);
        arena.get(dropped).unwrap().add_child(orphaned);

        let released = arena.retain_reachable(kept);
        assert_eq!(released, 3);
        assert!(arena.contains(kept));
        assert!(arena.contains(grandchild));
        assert!(!arena.contains(root));
        assert!(!arena.contains(dropped));
        assert!(arena.get(orphaned).is_none());
    }
}
