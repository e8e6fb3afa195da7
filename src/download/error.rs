//! Error types for the asset writer.

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors writing one item to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The asset could not be retrieved (before or during streaming).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Directory creation, file creation, or write failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for network-side failures.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

// No `From<std::io::Error>`: the path is mandatory context.
