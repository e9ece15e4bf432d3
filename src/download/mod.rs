//! Download requests and their results.
//!
//! - [`download`] - The [`Download`] request and URL handling
//! - [`summary`] - The [`Summary`] of a finished job

pub mod download;
pub mod summary;

pub use download::Download;
pub use summary::Summary;
