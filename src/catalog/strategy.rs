//! The extraction-strategy seam and the union of strategy outputs.

use scraper::Html;

use super::CatalogEntry;

/// One independent way of reading catalog entries out of the root page.
///
/// `None` means "this strategy does not apply to the page" and is distinct
/// from an empty catalog. Implementations never return `Some(vec![])`.
pub trait CatalogStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Extracts entries from the parsed root page.
    fn extract(&self, document: &Html) -> Option<Vec<CatalogEntry>>;
}

/// Result of running every strategy against one root page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogListing {
    /// No strategy applied; the publisher may not exist.
    Unavailable,
    /// At least one strategy applied but nothing was listed.
    Empty,
    /// Concatenated strategy outputs, in strategy order.
    Entries(Vec<CatalogEntry>),
}

impl CatalogListing {
    /// Unions strategy results in the order given.
    ///
    /// Absent results count as empty sequences. Duplicate identifiers across
    /// strategies are kept as-is.
    pub fn from_strategy_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Option<Vec<CatalogEntry>>>,
    {
        let mut applicable = false;
        let mut entries = Vec::new();
        for found in results.into_iter().flatten() {
            applicable = true;
            entries.extend(found);
        }

        match (applicable, entries.is_empty()) {
            (false, _) => Self::Unavailable,
            (true, true) => Self::Empty,
            (true, false) => Self::Entries(entries),
        }
    }

    /// Number of entries listed.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Entries(entries) => entries.len(),
            Self::Unavailable | Self::Empty => 0,
        }
    }

    /// Returns true when no entries are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
