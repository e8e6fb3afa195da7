//! Error types for catalog discovery.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that end catalog discovery for a publisher.
///
/// Both variants are fatal for the run.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog root page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Every extraction strategy was inapplicable to the root page.
    #[error("unable to fetch albums for '{publisher}' (do they have any albums?)")]
    Unavailable {
        /// The publisher whose catalog was requested.
        publisher: String,
    },
}

impl CatalogError {
    /// Creates an `Unavailable` error.
    pub fn unavailable(publisher: impl Into<String>) -> Self {
        Self::Unavailable {
            publisher: publisher.into(),
        }
    }
}
