//! Chunk planning, fetching, staging and merging.
//!
//! - [`plan`] - Partition a resource into contiguous byte ranges
//! - [`worker`] - Fetch one range into its staging file
//! - [`staging`] - Per-run staging directory and cleanup
//! - [`merge`] - Assemble staged chunks into the destination

pub mod merge;
pub mod plan;
pub mod staging;
pub mod worker;

pub use merge::merge;
pub use plan::{plan, ByteRange, ChunkEntry};
pub use staging::Staging;
pub use worker::{ChunkFailure, ChunkWorker};
