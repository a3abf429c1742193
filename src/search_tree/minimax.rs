//! Folding child values into parents, and the shallow cutoff test against
//! the grandparent's running value.

use std::ops::ControlFlow;

use log::trace;

use crate::board::side::Side;

use super::arena::NodeArena;
use super::node::SearchNode;
use super::stats::SearchStats;
use super::Score;

/// Combines a running value with a child's value for the side to move.
pub fn combine(side: Side, current: Score, child_value: Score) -> Score {
    if side.maximize_score() {
        current.max(child_value)
    } else {
        current.min(child_value)
    }
}

/// True when the parent's value can no longer improve the grandparent's
/// choice. Equality cuts too: the grandparent keeps its first best child.
pub fn is_cutoff(grandparent_side: Side, parent_value: Score, grandparent_value: Score) -> bool {
    if grandparent_side.maximize_score() {
        parent_value <= grandparent_value
    } else {
        parent_value >= grandparent_value
    }
}

/// True when `candidate` should replace `best` as the chosen child for `side`.
/// Ties keep the earlier child.
pub fn is_better(side: Side, candidate: Score, best: Score) -> bool {
    if side.maximize_score() {
        candidate > best
    } else {
        candidate < best
    }
}

/// Folds `child_value` into `parent` and decides whether the parent's
/// remaining children can be skipped. Locks the parent, releases it, then
/// reads the grandparent; the two locks are never held together.
pub(crate) fn fold_child(
    arena: &NodeArena,
    parent: &SearchNode,
    child_value: Score,
    pruning: bool,
    stats: &SearchStats,
) -> ControlFlow<()> {
    let side = parent.side_to_move();
    let (parent_value, grandparent_id) = {
        let mut state = parent.lock();
        let current = state.value.unwrap_or_else(|| side.initial_bound());
        let updated = combine(side, current, child_value);
        state.value = Some(updated);
        (updated, state.parent)
    };

    if !pruning {
        return ControlFlow::Continue(());
    }

    let grandparent = match grandparent_id.and_then(|id| arena.get(id)) {
        Some(grandparent) => grandparent,
        None => return ControlFlow::Continue(()),
    };
    let grandparent_value = match grandparent.value() {
        Some(value) => value,
        None => return ControlFlow::Continue(()),
    };

    if is_cutoff(grandparent.side_to_move(), parent_value, grandparent_value) {
        trace!(
            "cutoff at ply {}: {} against {}",
            parent.snapshot().ply(),
            parent_value,
            grandparent_value
        );
        stats.increment_cutoffs();
        ControlFlow::Break(())
    } else {
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::StartingPosition;
    use crate::search_tree::node::NodeId;
    use crate::snapshot::BoardSnapshot;

    fn snapshot_at(ply: u32) -> BoardSnapshot {
        let setup = StartingPosition::small();
        let base = BoardSnapshot::from_setup(&setup).unwrap();
        BoardSnapshot::new(
            base.dimensions(),
            base.queens(Side::A).iter().copied(),
            base.queens(Side::B).iter().copied(),
            base.burned().iter().copied(),
            ply,
        )
        .unwrap()
    }

    #[test]
    fn test_combine_uses_side_direction() {
        assert_eq!(combine(Side::A, 1.0, 3.0), 3.0);
        assert_eq!(combine(Side::B, 1.0, 3.0), 1.0);
        assert_eq!(combine(Side::A, Score::NEG_INFINITY, -2.0), -2.0);
    }

    #[test]
    fn test_cutoff_rules() {
        assert!(is_cutoff(Side::A, 2.0, 2.0));
        assert!(is_cutoff(Side::A, 1.0, 2.0));
        assert!(!is_cutoff(Side::A, 3.0, 2.0));
        assert!(is_cutoff(Side::B, 3.0, 2.0));
        assert!(!is_cutoff(Side::B, 1.0, 2.0));
    }

    #[test]
    fn test_is_better_keeps_first_on_ties() {
        assert!(!is_better(Side::A, 1.0, 1.0));
        assert!(is_better(Side::A, 1.5, 1.0));
        assert!(is_better(Side::B, 0.5, 1.0));
    }

    #[test]
    fn test_fold_child_prunes_against_grandparent() {
        let arena = NodeArena::new();
        let grandparent_id = arena.insert(SearchNode::new(snapshot_at(0), None, None));
        let parent_id = arena.insert(SearchNode::new(snapshot_at(1), None, Some(grandparent_id)));
        let stats = SearchStats::new();

        let grandparent = arena.get(grandparent_id).unwrap();
        grandparent.store_value(5.0);
        let parent = arena.get(parent_id).unwrap();
        parent.begin_expansion();

        let flow = fold_child(&arena, &parent, 7.0, true, &stats);
        assert!(flow.is_continue());
        assert_eq!(parent.value(), Some(7.0));

        let flow = fold_child(&arena, &parent, 4.0, true, &stats);
        assert!(flow.is_break());
        assert_eq!(parent.value(), Some(4.0));
        assert_eq!(stats.cutoffs(), 1);

        let flow = fold_child(&arena, &parent, 3.0, false, &stats);
        assert!(flow.is_continue());
        assert_eq!(parent.value(), Some(3.0));
    }

    #[test]
    fn test_fold_child_without_grandparent_never_prunes() {
        let arena = NodeArena::new();
        let parent_id = arena.insert(SearchNode::new(snapshot_at(1), None, Some(NodeId(999))));
        let parent = arena.get(parent_id).unwrap();
        let stats = SearchStats::new();
        parent.begin_expansion();

        let flow = fold_child(&arena, &parent, Score::NEG_INFINITY, true, &stats);
        assert!(flow.is_continue());
        assert_eq!(parent.value(), Some(Score::NEG_INFINITY));
    }
}
