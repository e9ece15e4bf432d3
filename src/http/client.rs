//! HTTP client setup and middleware configuration.
//!
//! Every request goes through a [`ClientWithMiddleware`] with request tracing.
//! Transport-level retries are opt-in: chunk retries are owned by the retry
//! coordinator, so the middleware only helps when a caller explicitly asks
//! for it (for instance to harden the probe against flaky proxies).
//!
//! # Example
//!
//! ```rust
//! use chunkdl::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Proxy,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// User agent sent with every request unless overridden through headers.
pub const DEFAULT_USER_AGENT: &str = "downloader";

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Retries performed by the transport middleware on transient failures.
    ///
    /// Zero disables the retry middleware entirely.
    pub transport_retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Headers added to every request, on top of the default user agent.
    pub headers: Option<HeaderMap>,
}

/// Creates an HTTP client with middleware configuration.
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    if let Some(extra) = config.headers {
        headers.extend(extra);
    }

    let mut inner_client_builder = reqwest::Client::builder().default_headers(headers);
    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }
    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());
    if config.transport_retries > 0 {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.transport_retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    Ok(builder.build())
}
