//! Handle to a download running in the background.

use crate::download::Summary;
use crate::error::{Error, Result};
use crate::progress::ProgressWatcher;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A download started with [`Downloader::spawn`](super::Downloader::spawn).
///
/// Dropping the handle does not stop the download; call [`cancel`](Self::cancel)
/// for that.
#[derive(Debug)]
pub struct DownloadHandle {
    watcher: ProgressWatcher,
    cancel: CancellationToken,
    task: JoinHandle<Result<Summary>>,
}

impl DownloadHandle {
    pub(crate) fn new(
        watcher: ProgressWatcher,
        cancel: CancellationToken,
        task: JoinHandle<Result<Summary>>,
    ) -> Self {
        Self {
            watcher,
            cancel,
            task,
        }
    }

    /// A new watcher on the job's progress.
    ///
    /// Values may go down when a chunk is discarded and retried.
    pub fn progress(&self) -> ProgressWatcher {
        self.watcher.clone()
    }

    /// Request cancellation. The job resolves with [`Error::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token cancelling this job, e.g. to tie it to a signal handler.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the job to finish.
    pub async fn wait(self) -> Result<Summary> {
        self.task
            .await
            .map_err(|e| Error::Internal(format!("download task failed: {e}")))?
    }
}
