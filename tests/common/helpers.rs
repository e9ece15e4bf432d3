#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chunkdl::{Download, DownloaderBuilder};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_FILENAME: &str = "payload.bin";
pub const TEST_USER_AGENT: &str = "downloader";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 31 % 251) as u8).collect()
}

/// Parses `bytes=start-end` into an inclusive pair.
pub fn parse_range(value: &str) -> Option<(usize, usize)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

/// Serves `content`, honouring `Range` headers the way a regular file server does.
#[derive(Clone)]
pub struct RangeResponder {
    content: Arc<Vec<u8>>,
}

impl RangeResponder {
    pub fn new(content: &[u8]) -> Self {
        Self {
            content: Arc::new(content.to_vec()),
        }
    }
}

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let len = self.content.len();
        let range = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_range);

        match range {
            Some((start, _)) if start >= len => ResponseTemplate::new(416)
                .insert_header("content-range", format!("bytes */{len}").as_str()),
            Some((start, end)) => {
                // Clamp like a file server does for ranges past the end.
                let end = end.min(len - 1);
                ResponseTemplate::new(206)
                    .insert_header(
                        "content-range",
                        format!("bytes {start}-{end}/{len}").as_str(),
                    )
                    .set_body_bytes(self.content[start..=end].to_vec())
            }
            None => ResponseTemplate::new(200).set_body_bytes(self.content.as_slice().to_vec()),
        }
    }
}

/// How [`FlakyResponder`] breaks a request.
enum Failure {
    /// Answer with this status and no body.
    Status(u16),
    /// Answer `206` but close the body halfway through the range.
    Truncated,
}

/// Fails the ranged requests starting at `start` a number of times, then
/// behaves like [`RangeResponder`].
pub struct FlakyResponder {
    inner: RangeResponder,
    start: usize,
    failure: Failure,
    remaining: AtomicU32,
}

impl FlakyResponder {
    /// Fail with `status`.
    pub fn new(content: &[u8], start: usize, status: u16, failures: u32) -> Self {
        Self {
            inner: RangeResponder::new(content),
            start,
            failure: Failure::Status(status),
            remaining: AtomicU32::new(failures),
        }
    }

    /// Fail by sending only the first half of the requested range.
    pub fn truncated(content: &[u8], start: usize, failures: u32) -> Self {
        Self {
            inner: RangeResponder::new(content),
            start,
            failure: Failure::Truncated,
            remaining: AtomicU32::new(failures),
        }
    }
}

impl Respond for FlakyResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let range = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_range);

        if let Some((start, end)) = range.filter(|(start, _)| *start == self.start) {
            let failing = self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return match self.failure {
                    Failure::Status(status) => ResponseTemplate::new(status),
                    Failure::Truncated => {
                        let len = self.inner.content.len();
                        let end = end.min(len - 1);
                        let half = start + (end - start + 1) / 2;
                        ResponseTemplate::new(206)
                            .insert_header(
                                "content-range",
                                format!("bytes {start}-{end}/{len}").as_str(),
                            )
                            .set_body_bytes(self.inner.content[start..half].to_vec())
                    }
                };
            }
        }
        self.inner.respond(request)
    }
}

/// HEAD response advertising `content`. The server omits the body on the wire.
pub fn head_response(content: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-length", content.len().to_string().as_str())
        .insert_header("accept-ranges", "bytes")
        .set_body_bytes(content.to_vec())
}

/// Mounts a HEAD probe and a range-aware GET for `content` at `/payload.bin`.
pub async fn mount_file(server: &MockServer, content: &[u8]) {
    Mock::given(method("HEAD"))
        .and(path(format!("/{TEST_FILENAME}")))
        .respond_with(head_response(content))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_FILENAME}")))
        .respond_with(RangeResponder::new(content))
        .mount(server)
        .await;
}

/// Download of `/payload.bin` on the mock server.
pub fn test_download(server: &MockServer) -> Download {
    Download::try_from(format!("{}/{TEST_FILENAME}", server.uri()).as_str())
        .expect("Failed to create download")
}

/// Downloader writing into `dir`, without progress bar and with a short backoff.
pub fn test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .backoff(Duration::from_millis(10))
}

/// Number of ranged GET requests the server received.
pub async fn ranged_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.headers.contains_key("range"))
        .count()
}

/// Entries left in a directory.
pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .collect()
}

/// Asserts that a file holds exactly `expected`.
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let actual = fs::read(path).expect("Failed to read downloaded file");
    assert_eq!(actual.len(), expected.len(), "size mismatch at {:?}", path);
    assert!(actual == expected, "content mismatch at {:?}", path);
}
