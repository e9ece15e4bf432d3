//! chunkdl downloads a file over HTTP(S) in concurrent byte-range chunks.
//!
//! The resource size is probed first, the byte range is split into chunks,
//! every chunk is fetched by its own task into a staging area and retried on
//! failure, and the staged chunks are finally merged, in order, into the
//! destination file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use chunkdl::{Download, DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let iso = "https://example.com/releases/image.iso";
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .chunks(8)
//!     .build();
//! let summary = downloader.download(&Download::try_from(iso)?).await?;
//! println!("saved {:?} in {:?}", summary.path(), summary.elapsed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`chunk`] - Chunk planning, fetching, staging and merging
//! - [`download`] - The `Download` request and its `Summary`
//! - [`downloader`] - The `Downloader`, its builder and the retry coordinator
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction and the size probe
//! - [`progress`] - Progress aggregation and display
//! - [`utils`] - Response header helpers

pub mod chunk;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::{Download, Summary};
pub use downloader::{DownloadHandle, Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{Progress, ProgressAggregator, ProgressBarOpts, ProgressWatcher};
