//! Size and range metadata extraction from HTTP response headers.
//!
//! The probe relies on these helpers to learn the total size of a resource,
//! either from a `Content-Length` header (HEAD probe) or from the total part of
//! a `Content-Range` header (ranged GET probe).

use reqwest::header::{HeaderMap, ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE};

/// Parse the total size out of a `Content-Range` header value.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// # Example
///
/// ```rust
/// use chunkdl::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Read the `Content-Length` header directly.
///
/// The header is read rather than `Response::content_length()` because the
/// latter reports the size of the received body, which is empty for HEAD.
pub fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Read the resource total from the `Content-Range` header, if any.
pub fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_RANGE)?
        .to_str()
        .ok()
        .and_then(parse_content_range_total)
}

/// Whether the server allows byte-range requests.
///
/// Only an explicit `Accept-Ranges: none` is treated as a refusal; many
/// servers honour `Range` without advertising it.
pub fn accepts_ranges(headers: &HeaderMap) -> bool {
    match headers.get(ACCEPT_RANGES) {
        Some(value) => !value.as_bytes().eq_ignore_ascii_case(b"none"),
        None => true,
    }
}
