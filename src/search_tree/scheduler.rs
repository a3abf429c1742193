//! Fans expansion work out over a rayon pool, or runs it inline when the
//! search is configured sequential.

use std::ops::ControlFlow;

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::stats::SearchStats;
use super::{SearchConfig, SearchError};

/// Marker returned through `try_for_each` when a task asks its siblings to stop.
struct Cutoff;

pub struct Scheduler {
    pool: Option<ThreadPool>,
}

impl Scheduler {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        if !config.parallel {
            return Ok(Self::sequential());
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|index| format!("amazons-search-{}", index))
            .build()
            .map_err(|error| SearchError::ThreadPool {
                msg: error.to_string(),
            })?;
        debug!("search pool started with {} threads", pool.current_num_threads());

        Ok(Self { pool: Some(pool) })
    }

    pub fn sequential() -> Self {
        Self { pool: None }
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    pub fn num_threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Runs `op` inside the pool so nested fan-outs use its workers.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Runs `task` once per item and waits for all of them.
    pub fn fan_out<T, F>(&self, items: &[T], stats: &SearchStats, task: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        if self.is_parallel() {
            items.par_iter().for_each(|item| {
                let _running = stats.enter_task();
                task(item);
            });
        } else {
            for item in items {
                let _running = stats.enter_task();
                task(item);
            }
        }
    }

    /// Like `fan_out`, but a task returning `Break` stops the remaining ones.
    /// Tasks already running in parallel finish their current step.
    pub fn fan_out_until<T, F>(&self, items: &[T], stats: &SearchStats, task: F) -> ControlFlow<()>
    where
        T: Sync,
        F: Fn(&T) -> ControlFlow<()> + Sync + Send,
    {
        if self.is_parallel() {
            let outcome = items.par_iter().try_for_each(|item| {
                let _running = stats.enter_task();
                match task(item) {
                    ControlFlow::Continue(()) => Ok(()),
                    ControlFlow::Break(()) => Err(Cutoff),
                }
            });
            match outcome {
                Ok(()) => ControlFlow::Continue(()),
                Err(Cutoff) => ControlFlow::Break(()),
            }
        } else {
            for item in items {
                let _running = stats.enter_task();
                if task(item).is_break() {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn parallel(threads: usize) -> Scheduler {
        Scheduler::new(&SearchConfig {
            parallel: true,
            pruning: true,
            threads,
        })
        .unwrap()
    }

    #[test]
    fn test_sequential_fan_out_visits_in_order() {
        let scheduler = Scheduler::sequential();
        let stats = SearchStats::new();
        let seen = std::sync::Mutex::new(Vec::new());
        scheduler.fan_out(&[1, 2, 3], &stats, |&item| seen.lock().unwrap().push(item));
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(stats.max_concurrent_tasks(), 1);
    }

    #[test]
    fn test_sequential_fan_out_until_stops_at_break() {
        let scheduler = Scheduler::sequential();
        let stats = SearchStats::new();
        let visited = AtomicUsize::new(0);
        let flow = scheduler.fan_out_until(&[1, 2, 3, 4], &stats, |&item| {
            visited.fetch_add(1, Ordering::SeqCst);
            if item == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(flow.is_break());
        assert_eq!(visited.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parallel_fan_out_visits_everything() {
        let scheduler = parallel(4);
        assert!(scheduler.is_parallel());
        assert_eq!(scheduler.num_threads(), 4);

        let stats = SearchStats::new();
        let total = AtomicUsize::new(0);
        let items: Vec<usize> = (1..=100).collect();
        scheduler.install(|| {
            scheduler.fan_out(&items, &stats, |&item| {
                total.fetch_add(item, Ordering::SeqCst);
            })
        });
        assert_eq!(total.load(Ordering::SeqCst), 5050);
        assert_eq!(stats.tasks_spawned(), 100);
    }

    #[test]
    fn test_parallel_fan_out_until_reports_break() {
        let scheduler = parallel(2);
        let stats = SearchStats::new();
        let items: Vec<usize> = (0..64).collect();
        let flow = scheduler.install(|| {
            scheduler.fan_out_until(&items, &stats, |&item| {
                if item == 10 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
        });
        assert!(flow.is_break());
    }
}
