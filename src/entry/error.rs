//! Error types for per-entry metadata extraction.
//!
//! Each variant names the entry so a failure can be reported without
//! aborting sibling entries.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors extracting the item list of one catalog entry.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The entry page could not be fetched.
    #[error("failed to fetch album '{entry}': {source}")]
    Fetch {
        /// Identifier of the entry.
        entry: String,
        /// The underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// The page has no owner-name element.
    #[error("album '{entry}' page has no artist name element")]
    MissingOwnerName {
        /// Identifier of the entry.
        entry: String,
    },

    /// The page has no element carrying the track list.
    #[error("album '{entry}' page has no track list payload")]
    MissingItemList {
        /// Identifier of the entry.
        entry: String,
    },

    /// The track list payload is not the expected JSON.
    #[error("album '{entry}' track list payload is malformed: {source}")]
    MalformedItemList {
        /// Identifier of the entry.
        entry: String,
        /// The decode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractionError {
    /// Creates a fetch error for an entry.
    pub fn fetch(entry: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            entry: entry.into(),
            source,
        }
    }

    /// Creates a missing owner name error.
    pub fn missing_owner_name(entry: impl Into<String>) -> Self {
        Self::MissingOwnerName {
            entry: entry.into(),
        }
    }

    /// Creates a missing item list error.
    pub fn missing_item_list(entry: impl Into<String>) -> Self {
        Self::MissingItemList {
            entry: entry.into(),
        }
    }

    /// Creates a malformed item list error.
    pub fn malformed_item_list(entry: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedItemList {
            entry: entry.into(),
            source,
        }
    }

    /// Identifier of the entry this error belongs to.
    #[must_use]
    pub fn entry(&self) -> &str {
        match self {
            Self::Fetch { entry, .. }
            | Self::MissingOwnerName { entry }
            | Self::MissingItemList { entry }
            | Self::MalformedItemList { entry, .. } => entry,
        }
    }
}
