use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Score;

/// Statistics collected during search.
pub struct SearchStats {
    nodes_created: AtomicUsize,
    nodes_visited: AtomicUsize,
    leaf_evaluations: AtomicUsize,
    cutoffs: AtomicUsize,
    tasks_spawned: AtomicUsize,
    active_tasks: AtomicUsize,
    max_concurrent_tasks: AtomicUsize,
    last_score: Option<Score>,
    last_duration: Option<Duration>,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            nodes_created: AtomicUsize::new(0),
            nodes_visited: AtomicUsize::new(0),
            leaf_evaluations: AtomicUsize::new(0),
            cutoffs: AtomicUsize::new(0),
            tasks_spawned: AtomicUsize::new(0),
            active_tasks: AtomicUsize::new(0),
            max_concurrent_tasks: AtomicUsize::new(0),
            last_score: None,
            last_duration: None,
        }
    }

    pub(crate) fn increment_created(&self) {
        self.nodes_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_visited(&self) {
        self.nodes_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_leaf_evaluations(&self) {
        self.leaf_evaluations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_cutoffs(&self) {
        self.cutoffs.fetch_add(1, Ordering::Relaxed);
    }

    /// Marks a scheduler task as running until the returned guard is dropped.
    pub(crate) fn enter_task(&self) -> TaskGuard<'_> {
        self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
        let active = self.active_tasks.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent_tasks.fetch_max(active, Ordering::SeqCst);
        TaskGuard { stats: self }
    }

    pub fn reset(&mut self) {
        self.last_score = None;
        self.last_duration = None;
        self.nodes_created.store(0, Ordering::SeqCst);
        self.nodes_visited.store(0, Ordering::SeqCst);
        self.leaf_evaluations.store(0, Ordering::SeqCst);
        self.cutoffs.store(0, Ordering::SeqCst);
        self.tasks_spawned.store(0, Ordering::SeqCst);
        self.active_tasks.store(0, Ordering::SeqCst);
        self.max_concurrent_tasks.store(0, Ordering::SeqCst);
    }

    pub(crate) fn record_result(&mut self, score: Score, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }

    pub fn nodes_created(&self) -> usize {
        self.nodes_created.load(Ordering::SeqCst)
    }

    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited.load(Ordering::SeqCst)
    }

    pub fn leaf_evaluations(&self) -> usize {
        self.leaf_evaluations.load(Ordering::SeqCst)
    }

    pub fn cutoffs(&self) -> usize {
        self.cutoffs.load(Ordering::SeqCst)
    }

    pub fn tasks_spawned(&self) -> usize {
        self.tasks_spawned.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent_tasks.load(Ordering::SeqCst)
    }

    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }
}

pub(crate) struct TaskGuard<'a> {
    stats: &'a SearchStats,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.stats.active_tasks.fetch_sub(1, Ordering::SeqCst);
    }
}
