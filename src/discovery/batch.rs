//! Batched wordlist sweep.
//!
//! The wordlist is cut into consecutive batches of `concurrency` entries. Every
//! entry of a batch runs as its own tokio task, and the next batch starts only
//! after all tasks of the current one have finished, which bounds the number of
//! queries in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use log::warn;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::config::PROGRESS_INTERVAL;
use crate::error_handling::{ErrorType, ProcessingStats};

/// What a sweep did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Size of every batch that ran, in order
    pub batches: Vec<usize>,
    /// Entries whose task finished
    pub processed: usize,
    /// The sweep stopped early because of an interrupt
    pub interrupted: bool,
}

/// Runs tasks in sequential, fully-joined batches.
pub struct BatchScheduler {
    concurrency: usize,
    cancel: CancellationToken,
    stats: Arc<ProcessingStats>,
}

impl BatchScheduler {
    pub fn new(concurrency: usize, cancel: CancellationToken, stats: Arc<ProcessingStats>) -> Self {
        Self {
            concurrency: concurrency.max(1),
            cancel,
            stats,
        }
    }

    /// Runs `task` for every item.
    ///
    /// Cancellation is checked between batches; a batch that already started
    /// always runs to completion.
    pub async fn run<T, F, Fut>(&self, items: Vec<T>, task: F) -> SweepSummary
    where
        T: Clone,
        F: Fn(T) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let total = items.len();
        let start_time = Instant::now();
        let mut summary = SweepSummary::default();

        for batch in items.chunks(self.concurrency) {
            if self.cancel.is_cancelled() {
                break;
            }

            let mut tasks = JoinSet::new();
            for item in batch {
                tasks.spawn(task(item.clone()));
            }

            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    self.stats.increment_error(ErrorType::LookupTaskError);
                    warn!("Lookup task failed: {e}");
                }
                summary.processed += 1;
                if summary.processed % PROGRESS_INTERVAL == 0 {
                    log_progress(start_time, summary.processed, total);
                }
            }
            summary.batches.push(batch.len());
        }

        summary.interrupted = self.cancel.is_cancelled();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_batches_are_consecutive_chunks() {
        let scheduler = BatchScheduler::new(
            50,
            CancellationToken::new(),
            Arc::new(ProcessingStats::new()),
        );

        let summary = scheduler.run((0..120).collect(), |_i: usize| async {}).await;

        assert_eq!(summary.batches, vec![50, 50, 20]);
        assert_eq!(summary.processed, 120);
        assert!(!summary.interrupted);
    }

    #[tokio::test]
    async fn test_next_batch_waits_for_previous() {
        let scheduler = BatchScheduler::new(
            10,
            CancellationToken::new(),
            Arc::new(ProcessingStats::new()),
        );
        let finished = Arc::new(AtomicUsize::new(0));
        let violations = Arc::new(AtomicUsize::new(0));

        let summary = scheduler
            .run((0..35).collect(), |i: usize| {
                let finished = Arc::clone(&finished);
                let violations = Arc::clone(&violations);
                async move {
                    // Every task of batch k must see all tasks of earlier batches done
                    if finished.load(Ordering::SeqCst) < (i / 10) * 10 {
                        violations.fetch_add(1, Ordering::SeqCst);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis((i % 3) as u64)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        assert_eq!(summary.batches, vec![10, 10, 10, 5]);
        assert_eq!(violations.load(Ordering::SeqCst), 0);
        assert_eq!(finished.load(Ordering::SeqCst), 35);
    }

    #[tokio::test]
    async fn test_cancel_stops_after_current_batch() {
        let cancel = CancellationToken::new();
        let scheduler = BatchScheduler::new(5, cancel.clone(), Arc::new(ProcessingStats::new()));

        let summary = scheduler
            .run((0..20).collect(), |i: usize| {
                let cancel = cancel.clone();
                async move {
                    if i == 2 {
                        cancel.cancel();
                    }
                }
            })
            .await;

        assert_eq!(summary.batches, vec![5]);
        assert_eq!(summary.processed, 5);
        assert!(summary.interrupted);
    }

    #[tokio::test]
    async fn test_panicking_task_is_counted() {
        let stats = Arc::new(ProcessingStats::new());
        let scheduler = BatchScheduler::new(4, CancellationToken::new(), Arc::clone(&stats));

        let summary = scheduler
            .run((0..4).collect(), |i: usize| async move {
                if i == 1 {
                    panic!("lookup blew up");
                }
            })
            .await;

        assert_eq!(summary.processed, 4);
        assert_eq!(stats.get_error_count(ErrorType::LookupTaskError), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let scheduler = BatchScheduler::new(
            50,
            CancellationToken::new(),
            Arc::new(ProcessingStats::new()),
        );
        let summary = scheduler.run(Vec::<String>::new(), |_w| async {}).await;
        assert!(summary.batches.is_empty());
        assert_eq!(summary.processed, 0);
    }
}
