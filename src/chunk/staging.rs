//! Per-run staging area holding chunk bytes until they are merged.
//!
//! Staging lives in a uniquely named hidden directory next to the
//! destination, so two runs targeting the same file never share chunk files
//! and the final rename stays on one filesystem.

use crate::error::Result;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, warn};

const MERGE_FILE: &str = "merged.part";
const STAGING_PREFIX: &str = ".chunkdl.";

/// Staging directory for one download job.
///
/// Dropping the value removes the directory and anything left in it.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Create a fresh staging directory inside `directory`.
    ///
    /// The name does not embed the destination file name, so any name the
    /// filesystem accepts for the destination also works for staging.
    pub fn create_in(directory: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".chunks")
            .tempdir_in(directory)?;
        debug!("Created staging directory {:?}", dir.path());
        Ok(Self { dir })
    }

    /// Location of the staging directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Staging file for the chunk at `index`.
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("chunk-{index}.part"))
    }

    /// File the merger assembles before renaming it over the destination.
    pub fn merge_path(&self) -> PathBuf {
        self.dir.path().join(MERGE_FILE)
    }

    /// Delete staged chunks `0..chunk_count` without reading them.
    ///
    /// Missing files are expected (already merged or never written). Other
    /// failures are logged and otherwise ignored, the job outcome is already
    /// decided when this runs.
    pub async fn cleanup(&self, chunk_count: usize) {
        let paths = (0..chunk_count)
            .map(|index| self.chunk_path(index))
            .chain(std::iter::once(self.merge_path()));
        for path in paths {
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Removed staged file {:?}", path),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove staged file {:?}: {}", path, e),
            }
        }
        if let Err(e) = fs::remove_dir(self.dir.path()).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove staging directory {:?}: {}", self.dir.path(), e);
            }
        }
    }
}
