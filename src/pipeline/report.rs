//! Outcome of one pipeline run.

use std::path::PathBuf;

use super::error::{Stage, UnitFailure};

/// Counters, written paths, and collected per-unit failures.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Entries discovered in the catalog.
    pub catalog_entries: usize,
    /// Entries left after applying the selection.
    pub selected_entries: usize,
    /// Entries whose items were extracted.
    pub entries_extracted: usize,
    /// Items found across all extracted entries.
    pub items_found: usize,
    /// Files written, in item order.
    pub written: Vec<PathBuf>,
    /// Failures in submission order (entries first, then items).
    pub failures: Vec<UnitFailure>,
}

impl RunReport {
    /// Number of entries that failed extraction.
    #[must_use]
    pub fn entries_failed(&self) -> usize {
        self.failures_in(Stage::Extraction)
    }

    /// Number of items written successfully.
    #[must_use]
    pub fn items_downloaded(&self) -> usize {
        self.written.len()
    }

    /// Number of items that failed to download.
    #[must_use]
    pub fn items_failed(&self) -> usize {
        self.failures_in(Stage::Download)
    }

    /// True when no unit failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// First failure observed, for diagnostics.
    #[must_use]
    pub fn first_failure(&self) -> Option<&UnitFailure> {
        self.failures.first()
    }

    fn failures_in(&self, stage: Stage) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.stage() == stage)
            .count()
    }
}
