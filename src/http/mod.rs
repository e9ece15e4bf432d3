//! HTTP plumbing: client construction and the size probe.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`probe`] - Metadata request used to learn the resource size

pub mod client;
pub mod probe;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
pub use probe::{probe, ProbeMethod, RemoteResource};
