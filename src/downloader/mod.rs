//! Downloader module: configuration, builder, orchestration and retries.
//!
//! - `builder` - [`DownloaderBuilder`] for configuring a [`Downloader`]
//! - `config` - [`DownloaderConfig`] and its defaults
//! - `coordinator` - Work queue and per-chunk retry policy
//! - `downloader` - Probe, plan, fetch and merge orchestration
//! - `handle` - [`DownloadHandle`] for jobs running in the background
//!
//! # Examples
//!
//! ```rust
//! use chunkdl::downloader::DownloaderBuilder;
//!
//! // Create a downloader with no visible progress bar
//! let downloader = DownloaderBuilder::hidden().chunks(4).build();
//! assert_eq!(downloader.chunks(), 4);
//! ```

pub mod builder;
pub mod config;
mod coordinator;
pub mod downloader;
pub mod handle;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_BACKOFF, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_FAILURES};
pub use downloader::Downloader;
pub use handle::DownloadHandle;
