//! Chunk worker: fetches one byte range into its staging file.

use super::plan::ChunkEntry;
use super::staging::Staging;
use crate::error::{Error, Result};
use crate::progress::ProgressAggregator;

use futures::StreamExt;
use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::sync::Arc;
use tokio::{
    fs::OpenOptions,
    io::{AsyncWriteExt, BufWriter},
};
use tracing::debug;

/// A failed chunk attempt.
///
/// `transferred` is the number of bytes the attempt had already reported to
/// the progress aggregator, so the coordinator can take that credit back.
#[derive(Debug)]
pub struct ChunkFailure {
    pub transferred: u64,
    pub error: Error,
}

impl fmt::Display for ChunkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} bytes)", self.error, self.transferred)
    }
}

/// Fetches chunks of one resource into a shared staging area.
///
/// A worker never retries on its own; that is the retry coordinator's job.
pub struct ChunkWorker {
    client: ClientWithMiddleware,
    url: Url,
    staging: Arc<Staging>,
    progress: ProgressAggregator,
    buffer_size: usize,
}

impl ChunkWorker {
    pub fn new(
        client: ClientWithMiddleware,
        url: Url,
        staging: Arc<Staging>,
        progress: ProgressAggregator,
        buffer_size: usize,
    ) -> Self {
        Self {
            client,
            url,
            staging,
            progress,
            buffer_size: buffer_size.max(1),
        }
    }

    /// Fetch `entry` and write it to the chunk's staging file, replacing
    /// whatever a previous attempt left there.
    ///
    /// Every received body frame is handed to the write buffer and reported
    /// to the progress aggregator before it is counted in the returned total,
    /// so a failed attempt's `transferred` matches the credit it gave.
    pub async fn fetch(&self, entry: ChunkEntry) -> std::result::Result<u64, ChunkFailure> {
        let mut transferred = 0;
        match self.try_fetch(entry, &mut transferred).await {
            Ok(()) => Ok(transferred),
            Err(error) => Err(ChunkFailure { transferred, error }),
        }
    }

    async fn try_fetch(&self, entry: ChunkEntry, transferred: &mut u64) -> Result<()> {
        debug!(index = entry.index, range = %entry.range, "Fetching chunk");
        let res = self
            .client
            .get(self.url.clone())
            .header(RANGE, entry.range.header_value())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Source { status });
        }
        // A full body is only usable when the chunk starts at the first byte.
        if status != StatusCode::PARTIAL_CONTENT && entry.range.start != 0 {
            return Err(Error::RangeIgnored { status });
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.staging.chunk_path(entry.index))
            .await?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);

        let expected = entry.range.len();
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let bytes = item?;
            let take = bytes.len().min((expected - *transferred) as usize);
            writer.write_all(&bytes[..take]).await?;
            self.progress.add(take as u64);
            *transferred += take as u64;
            if *transferred == expected {
                break;
            }
        }
        writer.flush().await?;

        if *transferred < expected {
            return Err(Error::ShortRead {
                expected,
                received: *transferred,
            });
        }
        debug!(index = entry.index, bytes = *transferred, "Chunk fetched");
        Ok(())
    }
}
