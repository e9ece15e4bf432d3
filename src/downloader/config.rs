//! Configuration structures and defaults for the downloader.

use crate::http::{HttpClientConfig, ProbeMethod};
use crate::progress::ProgressBarOpts;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Failures tolerated per chunk before the job is declared failed.
pub const DEFAULT_MAX_FAILURES: u32 = 1200;
/// Delay before a failed chunk is queued again.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
/// Capacity of the write buffer in front of each staging file.
pub const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Configuration structure for the downloader
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Desired number of chunks per download. Never zero.
    pub chunks: usize,
    /// A chunk fails the job once its failure count exceeds this cap.
    pub max_failures: u32,
    /// Fixed delay before a failed chunk is retried.
    pub backoff: Duration,
    /// Capacity of the write buffer in front of each staging file.
    pub buffer_size: usize,
    /// Maximum number of chunks fetched at the same time, unlimited if `None`.
    pub max_connections: Option<usize>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Retries performed by the HTTP transport middleware, off by default.
    pub transport_retries: u32,
    /// Use range requests to get content length instead of HEAD requests.
    pub use_range_for_content_length: bool,
    /// Replace an existing destination file.
    pub overwrite: bool,
    /// Progress bar used by [`Downloader::download`](super::Downloader::download).
    pub style: ProgressBarOpts,
}

impl DownloaderConfig {
    pub(crate) fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            transport_retries: self.transport_retries,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
        }
    }

    pub(crate) fn probe_method(&self) -> ProbeMethod {
        if self.use_range_for_content_length {
            ProbeMethod::Range
        } else {
            ProbeMethod::Head
        }
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            chunks: 1,
            max_failures: DEFAULT_MAX_FAILURES,
            backoff: DEFAULT_BACKOFF,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_connections: None,
            headers: None,
            proxy: None,
            transport_retries: 0,
            use_range_for_content_length: false,
            overwrite: false,
            style: ProgressBarOpts::default(),
        }
    }
}
