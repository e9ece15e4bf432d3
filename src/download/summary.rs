//! Outcome of a finished download job.

use super::download::Download;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Represents a completed [`Download`].
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    download: Download,
    /// Where the file was written.
    path: PathBuf,
    /// Size in bytes, as reported by the probe.
    size: u64,
    /// Number of chunks the resource was fetched in.
    chunks: usize,
    /// Wall-clock time of the whole job.
    elapsed: Duration,
}

impl Summary {
    /// Create a new [`Download`] [`Summary`].
    pub fn new(download: Download, path: PathBuf, size: u64, chunks: usize, elapsed: Duration) -> Self {
        Self {
            download,
            path,
            size,
            chunks,
            elapsed,
        }
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Get the destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the number of chunks used.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Get the time the job took.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
