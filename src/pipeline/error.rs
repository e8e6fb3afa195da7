//! Error types for the pipeline orchestrator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::engine::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use crate::catalog::CatalogError;
use crate::download::WriteError;
use crate::entry::{DownloadableItem, ExtractionError};

/// Errors that stop a run before or between stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Catalog discovery failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// The two fan-out stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Entries to items.
    Extraction,
    /// Items to files.
    Download,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction => f.write_str("extraction"),
            Self::Download => f.write_str("download"),
        }
    }
}

/// One unit of work that failed inside a stage. Siblings are unaffected.
#[derive(Debug, Error)]
pub enum UnitFailure {
    /// An entry's items could not be extracted.
    #[error(transparent)]
    Entry(#[from] ExtractionError),

    /// An item could not be written.
    #[error("failed to download '{}' ({}): {source}", item.item_title, item.work_title)]
    Item {
        /// The item that failed.
        item: Box<DownloadableItem>,
        /// Why it failed.
        #[source]
        source: WriteError,
    },

    /// An item maps to a path already claimed by an earlier item in the run.
    #[error(
        "'{}' ({}) maps to {}, already written by an earlier song",
        item.item_title,
        item.work_title,
        path.display()
    )]
    DuplicateDestination {
        /// The item that was not written.
        item: Box<DownloadableItem>,
        /// The contested path.
        path: PathBuf,
    },

    /// A unit's task panicked.
    #[error("{stage} task for '{unit}' panicked: {message}")]
    Panicked {
        /// Stage the task belonged to.
        stage: Stage,
        /// Entry identifier or item title.
        unit: String,
        /// Join error text.
        message: String,
    },
}

impl UnitFailure {
    /// Creates an item failure.
    pub fn item(item: DownloadableItem, source: WriteError) -> Self {
        Self::Item {
            item: Box::new(item),
            source,
        }
    }

    /// Stage the failure occurred in.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Entry(_) => Stage::Extraction,
            Self::Item { .. } | Self::DuplicateDestination { .. } => Stage::Download,
            Self::Panicked { stage, .. } => *stage,
        }
    }
}
