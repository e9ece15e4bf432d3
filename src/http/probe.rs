//! Range prober: learns the total size of a remote resource.

use crate::error::{Error, Result};
use crate::utils::{accepts_ranges, content_range_total, declared_length};

use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// How the probe asks the server for the resource size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// Metadata-only `HEAD` request, size read from `Content-Length`.
    #[default]
    Head,
    /// `GET` with `Range: bytes=0-0`, size read from the `Content-Range` total.
    ///
    /// Useful for servers that answer HEAD without a usable length.
    Range,
}

/// What the probe learned about the remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteResource {
    /// Total size in bytes.
    pub size: u64,
    /// Whether ranged requests may be issued against the resource.
    pub accepts_ranges: bool,
}

/// Probe `url` for its total size.
///
/// There are no retries at this layer: any failure is fatal to the job.
pub async fn probe(
    client: &ClientWithMiddleware,
    url: &Url,
    method: ProbeMethod,
) -> Result<RemoteResource> {
    debug!(%url, ?method, "Probing resource size");
    let res = match method {
        ProbeMethod::Head => client.head(url.clone()).send().await?,
        ProbeMethod::Range => {
            client
                .get(url.clone())
                .header(RANGE, "bytes=0-0")
                .send()
                .await?
        }
    };

    let status = res.status();
    if !status.is_success() {
        return Err(Error::Source { status });
    }

    let headers = res.headers();
    let resource = match (method, status) {
        (ProbeMethod::Range, StatusCode::PARTIAL_CONTENT) => RemoteResource {
            size: content_range_total(headers).ok_or_else(|| {
                Error::SizeUnavailable("Content-Range total missing from response".into())
            })?,
            accepts_ranges: true,
        },
        // A full response to a ranged probe means the server ignored Range.
        (ProbeMethod::Range, _) => RemoteResource {
            size: declared_length(headers).ok_or_else(|| {
                Error::SizeUnavailable("Content-Length missing from response".into())
            })?,
            accepts_ranges: false,
        },
        (ProbeMethod::Head, _) => RemoteResource {
            size: declared_length(headers).ok_or_else(|| {
                Error::SizeUnavailable("Content-Length missing from response".into())
            })?,
            accepts_ranges: accepts_ranges(headers),
        },
    };

    debug!(size = resource.size, accepts_ranges = resource.accepts_ranges, "Probe complete");
    Ok(resource)
}
