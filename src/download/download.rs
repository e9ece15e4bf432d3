//! The [`Download`] request: what to fetch and the name to save it under.
//!
//! ```rust
//! use chunkdl::download::Download;
//! use std::convert::TryFrom;
//!
//! // Create from URL string (filename extracted automatically)
//! let download = Download::try_from("https://example.com/file.zip")?;
//! assert_eq!(download.filename, "file.zip");
//!
//! // Create with custom filename
//! let url = reqwest::Url::parse("https://example.com/download")?;
//! let download = Download::new(&url, "custom-name.zip");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file on disk.
    pub filename: String,
}

impl Download {
    /// Creates a new [`Download`].
    ///
    /// When using the [`Download::try_from`] method, the file name is
    /// automatically extracted from the URL.
    pub fn new(url: &Url, filename: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
        }
    }
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .map(|segment| {
                form_urlencoded::parse(segment.as_bytes())
                    .map(|(key, val)| [key, val].concat())
                    .collect::<String>()
            })
            .filter(|filename| !filename.is_empty())
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })
            .and_then(|filename| {
                if is_plain_filename(&filename) {
                    Ok(Download {
                        url: value.clone(),
                        filename,
                    })
                } else {
                    Err(Error::InvalidUrl(format!(
                        "The url \"{}\" decodes to an unusable file name {:?}",
                        value, filename
                    )))
                }
            })
    }
}

/// Whether `filename` names a single entry of the destination directory.
///
/// Path separators of any platform and the `.`/`..` entries are refused, so
/// joining the name onto the destination directory never leaves it.
pub(crate) fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(&['/', '\\', '\0'][..])
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Download::try_from(&u))
    }
}
