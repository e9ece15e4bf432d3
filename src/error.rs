//! Error handling for chunkdl.
//!
//! Every failure a job can surface is a variant of [`Error`]. Chunk-level
//! failures (`Source`, `Transport`, `Storage`, `ShortRead`) are absorbed by the
//! retry coordinator until a chunk exhausts its failure budget, at which point
//! the last cause is wrapped in [`Error::ChunkFailed`] and returned to the
//! caller.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen while downloading with chunkdl.
#[derive(Error, Debug)]
pub enum Error {
    /// The probe could not learn the total size of the resource.
    ///
    /// Fatal to the job, never retried.
    #[error("could not determine file size: {0}")]
    SizeUnavailable(String),

    /// The server answered with a status outside of the 2xx range.
    #[error("response from source is {status}")]
    Source { status: StatusCode },

    /// Network level failure while talking to the server.
    #[error("transport error")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Local filesystem failure while staging or merging chunks.
    #[error("storage error")]
    Storage {
        #[from]
        source: io::Error,
    },

    /// The server answered a ranged request with the whole resource.
    #[error("server ignored the requested range (status {status})")]
    RangeIgnored { status: StatusCode },

    /// The server closed a chunk body before the requested range was complete.
    #[error("short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: u64, received: u64 },

    /// A chunk exceeded the failure cap. Carries the cause of the last attempt.
    #[error("chunk {index} failed after {attempts} attempts")]
    ChunkFailed {
        index: usize,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// The provided URL cannot be used for a download.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The destination file exists and overwriting is disabled.
    #[error("destination {0:?} already exists")]
    DestinationExists(PathBuf),

    /// The job was cancelled through its cancellation token.
    #[error("download cancelled")]
    Cancelled,

    /// Unexpected internal failure, such as a panicking worker task.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport {
            source: reqwest_middleware::Error::Reqwest(source),
        }
    }
}

impl Error {
    /// Returns the HTTP status if the error was caused by a non-2xx response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Source { status } => Some(*status),
            Error::ChunkFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for chunkdl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn chunk_failed_exposes_last_cause() {
        let err = Error::ChunkFailed {
            index: 3,
            attempts: 1201,
            source: Box::new(Error::Source {
                status: StatusCode::SERVICE_UNAVAILABLE,
            }),
        };

        assert_eq!(err.to_string(), "chunk 3 failed after 1201 attempts");
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(err
            .source()
            .map(|cause| cause.to_string().contains("503"))
            .unwrap_or(false));
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Storage { .. }));
        assert_eq!(err.status(), None);
    }
}
