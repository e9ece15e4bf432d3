//! Core downloader implementation.
//!
//! A job runs through four stages: the probe learns the resource size, the
//! planner splits it into chunks, the retry coordinator fetches every chunk
//! into staging, and the merger assembles the destination file. When the
//! coordinator fails, staging is cleaned up instead and no destination file
//! is produced.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chunkdl::downloader::DownloaderBuilder;
//! use chunkdl::download::Download;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().chunks(10).build();
//! let summary = downloader
//!     .download(&Download::try_from("https://example.com/file.iso")?)
//!     .await?;
//! println!("{} bytes in {:?}", summary.size(), summary.elapsed());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::coordinator::RetryCoordinator;
use super::handle::DownloadHandle;
use crate::chunk::{merge, plan, ChunkEntry, ChunkWorker, Staging};
use crate::download::{download::is_plain_filename, Download, Summary};
use crate::error::{Error, Result};
use crate::http::{create_http_client, probe};
use crate::progress::{ProgressAggregator, ProgressDisplay};

use reqwest::header::HeaderMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use chunkdl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the desired number of chunks.
    pub fn chunks(&self) -> usize {
        self.config.chunks
    }

    /// Gets the per-chunk failure cap.
    pub fn max_failures(&self) -> u32 {
        self.config.max_failures
    }

    /// Gets the delay before a failed chunk is retried.
    pub fn backoff(&self) -> Duration {
        self.config.backoff
    }

    /// Gets the capacity of the staging write buffer.
    pub fn buffer_size(&self) -> usize {
        self.config.buffer_size
    }

    /// Gets the limit on concurrently fetched chunks.
    pub fn max_connections(&self) -> Option<usize> {
        self.config.max_connections
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether to use range requests for content length.
    pub fn use_range_for_content_length(&self) -> bool {
        self.config.use_range_for_content_length
    }

    /// Gets whether to overwrite existing files.
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Downloads a file, rendering progress with the configured bar.
    pub async fn download(&self, download: &Download) -> Result<Summary> {
        let (progress, watcher) = ProgressAggregator::new();
        let display = ProgressDisplay::new(self.config.style.clone());
        let follow = tokio::spawn(display.follow(watcher));

        let result = self
            .download_with(download, progress, CancellationToken::new())
            .await;

        if let Err(e) = follow.await {
            debug!("Progress display stopped abnormally: {}", e);
        }
        result
    }

    /// Starts a download on the tokio runtime and returns a handle to
    /// observe, cancel and await it.
    pub fn spawn(&self, download: Download) -> DownloadHandle {
        let (progress, watcher) = ProgressAggregator::new();
        let cancel = CancellationToken::new();
        let downloader = self.clone();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            downloader.download_with(&download, progress, token).await
        });
        DownloadHandle::new(watcher, cancel, task)
    }

    /// Downloads a file, reporting progress to `progress` and stopping early
    /// when `cancel` fires.
    ///
    /// `progress` is dropped when this returns, which ends every watcher of
    /// it.
    pub async fn download_with(
        &self,
        download: &Download,
        progress: ProgressAggregator,
        cancel: CancellationToken,
    ) -> Result<Summary> {
        let started = Instant::now();
        if !is_plain_filename(&download.filename) {
            return Err(Error::InvalidUrl(format!(
                "{:?} is not a plain file name",
                download.filename
            )));
        }
        let destination = self.config.directory.join(&download.filename);

        if !self.config.overwrite && fs::try_exists(&destination).await? {
            return Err(Error::DestinationExists(destination));
        }
        debug!("Creating destination directory {:?}", self.config.directory);
        fs::create_dir_all(&self.config.directory).await?;

        let client = create_http_client(self.config.http_config())?;
        let resource = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            resource = probe(&client, &download.url, self.config.probe_method()) => resource?,
        };
        progress.set_total(resource.size);

        let chunks = if resource.accepts_ranges {
            self.config.chunks
        } else {
            debug!("Server does not accept ranges, falling back to a single chunk");
            1
        };
        let entries = plan(resource.size, chunks);
        let chunk_count = entries.len();
        info!(
            url = %download.url,
            size = resource.size,
            chunks = chunk_count,
            "Starting download of {:?}",
            destination
        );

        if entries.is_empty() {
            fs::File::create(&destination).await?;
            return Ok(Summary::new(
                download.clone(),
                destination,
                0,
                0,
                started.elapsed(),
            ));
        }

        let staging = Arc::new(Staging::create_in(&self.config.directory)?);
        let worker = Arc::new(ChunkWorker::new(
            client,
            download.url.clone(),
            staging.clone(),
            progress.clone(),
            self.config.buffer_size,
        ));
        let fetch = move |entry: ChunkEntry| {
            let worker = worker.clone();
            async move { worker.fetch(entry).await }
        };

        let coordinator = RetryCoordinator::new(
            self.config.max_failures,
            self.config.backoff,
            self.config.max_connections,
        );
        if let Err(e) = coordinator.run(entries, fetch, &progress, &cancel).await {
            warn!("Download of {} failed: {}", download.url, e);
            staging.cleanup(chunk_count).await;
            return Err(e);
        }

        let merged = merge(&staging, chunk_count, &destination).await;
        staging.cleanup(chunk_count).await;
        let written = merged?;
        if written != resource.size {
            warn!(
                "Merged {} bytes but the source reported {}",
                written, resource.size
            );
        }

        let elapsed = started.elapsed();
        info!("Downloaded {:?} in {:?}", destination, elapsed);
        Ok(Summary::new(
            download.clone(),
            destination,
            resource.size,
            chunk_count,
            elapsed,
        ))
    }
}
