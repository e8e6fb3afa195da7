//! Streams one item's asset into its destination file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::error::WriteError;
use super::filename::Destination;
use crate::config::OutputSettings;
use crate::entry::DownloadableItem;
use crate::fetch::{ByteStream, Fetcher};

/// Writes items under an output root.
///
/// Existing files are overwritten. A failed write leaves whatever was
/// written so far in place.
pub struct AssetWriter {
    fetcher: Arc<dyn Fetcher>,
    output_dir: PathBuf,
    output: OutputSettings,
}

impl std::fmt::Debug for AssetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetWriter")
            .field("output_dir", &self.output_dir)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl AssetWriter {
    /// Creates a writer rooted at `output_dir`.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        output_dir: impl Into<PathBuf>,
        output: OutputSettings,
    ) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            output,
        }
    }

    /// Root directory items are written under.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path `item` is written to.
    #[must_use]
    pub fn destination_path(&self, item: &DownloadableItem) -> PathBuf {
        Destination::for_item(&self.output_dir, item).file_path()
    }

    /// Downloads one item and returns the written path.
    ///
    /// Creates missing directories, truncates the destination, then streams
    /// the asset into it.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] for directory or file failures and
    /// [`WriteError::Fetch`] when the asset request or stream fails.
    #[instrument(skip(self, item), fields(item = %item.item_title, url = %item.asset_url))]
    pub async fn write_item(&self, item: &DownloadableItem) -> Result<PathBuf, WriteError> {
        let destination = Destination::for_item(&self.output_dir, item);
        let file_path = destination.file_path();

        tokio::fs::create_dir_all(&destination.directory)
            .await
            .map_err(|e| WriteError::io(&destination.directory, e))?;

        let file = File::create(&file_path)
            .await
            .map_err(|e| WriteError::io(&file_path, e))?;

        let stream = self.fetcher.fetch_stream(&item.asset_url).await?;
        let bytes = stream_to_file(file, stream, &file_path).await?;

        if self.output.announces() {
            info!(
                song = %item.item_title,
                album = %item.work_title,
                path = %file_path.display(),
                bytes,
                "[Downloaded]"
            );
        }

        Ok(file_path)
    }
}

/// Copies the stream into the file, returning bytes written.
///
/// Takes ownership of both ends so they are released on every return path.
async fn stream_to_file(
    file: File,
    mut stream: ByteStream,
    file_path: &Path,
) -> Result<u64, WriteError> {
    let mut writer = BufWriter::new(file);
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| WriteError::io(file_path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| WriteError::io(file_path, e))?;
    debug!(path = %file_path.display(), bytes = bytes_written, "stream flushed");

    Ok(bytes_written)
}
