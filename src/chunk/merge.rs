//! Merger: concatenates staged chunks into the destination file.

use super::staging::Staging;
use crate::error::Result;

use std::path::Path;
use tokio::{
    fs::{self, File, OpenOptions},
    io::{self, AsyncWriteExt, BufWriter},
};
use tracing::debug;

/// Concatenate staged chunks `0..chunk_count`, in index order, into
/// `destination`.
///
/// The chunks are assembled in a file inside the staging directory which is
/// synced and then renamed over `destination`, so the destination never holds
/// a partially merged file. Each staged chunk is deleted once appended.
/// Returns the number of bytes written.
pub async fn merge(staging: &Staging, chunk_count: usize, destination: &Path) -> Result<u64> {
    let merge_path = staging.merge_path();
    debug!("Merging {} chunks into {:?}", chunk_count, merge_path);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&merge_path)
        .await?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    for index in 0..chunk_count {
        let chunk_path = staging.chunk_path(index);
        let mut chunk = File::open(&chunk_path).await?;
        written += io::copy(&mut chunk, &mut writer).await?;
        drop(chunk);
        fs::remove_file(&chunk_path).await?;
    }

    writer.flush().await?;
    let file = writer.into_inner();
    file.sync_all().await?;
    drop(file);

    fs::rename(&merge_path, destination).await?;
    debug!("Merged {} bytes into {:?}", written, destination);
    Ok(written)
}
