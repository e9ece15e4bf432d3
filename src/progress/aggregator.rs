//! Progress aggregation across concurrent chunk workers.
//!
//! Workers add bytes as they stage them, the retry coordinator rolls back the
//! credit of discarded attempts. Both go through one [`tokio::sync::watch`]
//! channel: a single-slot mailbox that always holds the latest total.
//! Producers never wait for observers, and a slow observer simply skips
//! intermediate values.
//!
//! Observed values only grow while no chunk is retried. A rollback makes the
//! total drop by the bytes of the discarded attempt, so consumers must not
//! assume monotonic values.
//!
//! ```rust
//! use chunkdl::progress::ProgressAggregator;
//!
//! let (progress, watcher) = ProgressAggregator::new();
//! progress.set_total(100);
//! progress.add(60);
//! progress.rollback(20);
//! assert_eq!(watcher.current().transferred, 40);
//! assert_eq!(watcher.current().total, Some(100));
//! ```

use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of a job's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Confirmed bytes staged so far.
    pub transferred: u64,
    /// Total size of the resource, once the probe has learned it.
    pub total: Option<u64>,
}

impl Progress {
    /// Completion ratio in `[0, 1]`, if the total is known and non-zero.
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.transferred as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}

/// Write side of the progress channel, shared by every producer of a job.
#[derive(Debug, Clone)]
pub struct ProgressAggregator {
    tx: Arc<watch::Sender<Progress>>,
}

impl ProgressAggregator {
    /// Create an aggregator and the watcher observing it.
    pub fn new() -> (Self, ProgressWatcher) {
        let (tx, rx) = watch::channel(Progress::default());
        (Self { tx: Arc::new(tx) }, ProgressWatcher { rx })
    }

    /// Record the total size of the resource.
    pub fn set_total(&self, total: u64) {
        self.tx.send_modify(|p| p.total = Some(total));
    }

    /// Credit `bytes` delivered by a worker.
    pub fn add(&self, bytes: u64) {
        if bytes > 0 {
            self.tx.send_modify(|p| p.transferred += bytes);
        }
    }

    /// Take back the credit of a discarded attempt.
    pub fn rollback(&self, bytes: u64) {
        if bytes > 0 {
            self.tx
                .send_modify(|p| p.transferred = p.transferred.saturating_sub(bytes));
        }
    }

    /// Latest published value.
    pub fn current(&self) -> Progress {
        *self.tx.borrow()
    }

    /// Open another watcher on this aggregator.
    pub fn watch(&self) -> ProgressWatcher {
        ProgressWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the progress channel.
#[derive(Debug, Clone)]
pub struct ProgressWatcher {
    rx: watch::Receiver<Progress>,
}

impl ProgressWatcher {
    /// Latest published value, without waiting.
    pub fn current(&self) -> Progress {
        *self.rx.borrow()
    }

    /// Wait for a value newer than the last one seen.
    ///
    /// Returns `None` once every producer is gone, i.e. the job has ended.
    pub async fn changed(&mut self) -> Option<Progress> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
