//! Retry coordinator: owns the chunk work queue.
//!
//! A single dispatch loop pops chunk tasks from the queue, runs every attempt
//! on its own tokio task and is the only place where failure counts and the
//! success count are touched. Attempts and backoff timers report back as
//! events through one [`JoinSet`], so a failed chunk only re-enters the queue
//! after its attempt has returned and its backoff has elapsed. No two
//! attempts of the same chunk ever run at the same time.

use crate::chunk::{ChunkEntry, ChunkFailure};
use crate::error::{Error, Result};
use crate::progress::ProgressAggregator;

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A chunk travelling through the work queue.
#[derive(Debug, Clone, Copy)]
struct ChunkTask {
    entry: ChunkEntry,
    failures: u32,
}

enum Event {
    Attempted {
        task: ChunkTask,
        outcome: std::result::Result<u64, ChunkFailure>,
    },
    BackoffElapsed(ChunkTask),
}

#[derive(Debug, Clone)]
pub(crate) struct RetryCoordinator {
    max_failures: u32,
    backoff: Duration,
    max_in_flight: usize,
}

impl RetryCoordinator {
    pub(crate) fn new(max_failures: u32, backoff: Duration, max_in_flight: Option<usize>) -> Self {
        Self {
            max_failures,
            backoff,
            max_in_flight: max_in_flight.unwrap_or(usize::MAX).max(1),
        }
    }

    /// Drive every entry to success through `fetch`.
    ///
    /// Resolves once: `Ok` when all chunks succeeded, or the error of the
    /// first chunk whose failure count exceeded the cap. On failure or
    /// cancellation every attempt still in flight is aborted and awaited
    /// before returning, so nothing writes to staging afterwards.
    pub(crate) async fn run<F, Fut>(
        &self,
        entries: Vec<ChunkEntry>,
        fetch: F,
        progress: &ProgressAggregator,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        F: Fn(ChunkEntry) -> Fut,
        Fut: Future<Output = std::result::Result<u64, ChunkFailure>> + Send + 'static,
    {
        let total = entries.len();
        let mut queue: VecDeque<ChunkTask> = entries
            .into_iter()
            .map(|entry| ChunkTask { entry, failures: 0 })
            .collect();
        let mut events = JoinSet::new();
        let mut in_flight = 0;
        let mut succeeded = 0;

        let result = loop {
            if succeeded == total {
                break Ok(());
            }

            while in_flight < self.max_in_flight {
                let Some(task) = queue.pop_front() else {
                    break;
                };
                let attempt = fetch(task.entry);
                events.spawn(async move {
                    Event::Attempted {
                        task,
                        outcome: attempt.await,
                    }
                });
                in_flight += 1;
            }

            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => break Err(Error::Cancelled),
                joined = events.join_next() => joined,
            };
            let event = match joined {
                Some(Ok(event)) => event,
                Some(Err(e)) => break Err(Error::Internal(format!("chunk task failed: {e}"))),
                None => {
                    break Err(Error::Internal(
                        "work queue drained before every chunk succeeded".into(),
                    ))
                }
            };

            match event {
                Event::Attempted {
                    task,
                    outcome: Ok(bytes),
                } => {
                    in_flight -= 1;
                    succeeded += 1;
                    debug!(
                        index = task.entry.index,
                        bytes,
                        succeeded,
                        total,
                        "Chunk succeeded"
                    );
                }
                Event::Attempted {
                    mut task,
                    outcome: Err(failure),
                } => {
                    in_flight -= 1;
                    task.failures += 1;
                    if task.failures > self.max_failures {
                        warn!(
                            index = task.entry.index,
                            failures = task.failures,
                            "Chunk exceeded its failure cap: {}",
                            failure
                        );
                        break Err(Error::ChunkFailed {
                            index: task.entry.index,
                            attempts: task.failures,
                            source: Box::new(failure.error),
                        });
                    }

                    progress.rollback(failure.transferred);
                    debug!(
                        index = task.entry.index,
                        failures = task.failures,
                        "Chunk failed, retrying in {:?}: {}",
                        self.backoff,
                        failure
                    );
                    let backoff = self.backoff;
                    events.spawn(async move {
                        tokio::time::sleep(backoff).await;
                        Event::BackoffElapsed(task)
                    });
                }
                Event::BackoffElapsed(task) => queue.push_back(task),
            }
        };

        events.shutdown().await;
        result
    }
}
