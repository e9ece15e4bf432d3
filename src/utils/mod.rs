//! Shared utility functions.
//!
//! - [`content_length`] - Size and range metadata extraction from response headers

pub mod content_length;

pub use content_length::{accepts_ranges, content_range_total, declared_length, parse_content_range_total};
