//! Two-stage fan-out over one publisher's catalog.
//!
//! Stage one turns selected catalog entries into items; stage two writes
//! every item to disk. Each stage spawns one task per unit, gated by a shared
//! semaphore so no more than `concurrency` units are in flight at once.
//! Results are joined in submission order, so the report lists failures in
//! the order their units were submitted.
//!
//! Stage two writes each destination path at most once: the first item to
//! claim a path is written, later items mapping to it are recorded as
//! [`UnitFailure::DuplicateDestination`] without being fetched.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::error::{PipelineError, Stage, UnitFailure};
use super::report::RunReport;
use crate::catalog::{CatalogEntry, CatalogExtractor};
use crate::config::{OutputSettings, PipelineConfig};
use crate::download::{AssetWriter, WriteError};
use crate::entry::{DownloadableItem, EntryExtractor};
use crate::fetch::Fetcher;

/// Minimum allowed concurrency value.
pub(crate) const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
pub(crate) const MAX_CONCURRENCY: usize = 64;

/// Default ceiling on in-flight units per stage.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Which catalog entries a run processes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntrySelection {
    /// Every entry in the catalog.
    #[default]
    All,
    /// Only entries whose identifier is listed. Unknown identifiers are ignored.
    Only(Vec<String>),
}

impl EntrySelection {
    /// Builds a selection from command-line identifiers; none means all.
    #[must_use]
    pub fn from_identifiers(identifiers: Vec<String>) -> Self {
        if identifiers.is_empty() {
            Self::All
        } else {
            Self::Only(identifiers)
        }
    }

    /// Filters `catalog`, keeping catalog order.
    #[must_use]
    pub fn apply(&self, catalog: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        match self {
            Self::All => catalog,
            Self::Only(identifiers) => {
                for identifier in identifiers {
                    if !catalog.iter().any(|entry| &entry.identifier == identifier) {
                        debug!(identifier = %identifier, "requested album not in catalog");
                    }
                }
                catalog
                    .into_iter()
                    .filter(|entry| identifiers.contains(&entry.identifier))
                    .collect()
            }
        }
    }
}

/// Runs catalog discovery, extraction, and downloads for one publisher.
#[derive(Debug)]
pub struct PipelineEngine {
    semaphore: Arc<Semaphore>,
    concurrency: usize,
    catalog: CatalogExtractor,
    entries: Arc<EntryExtractor>,
    writer: Arc<AssetWriter>,
    output: OutputSettings,
}

impl PipelineEngine {
    /// Builds an engine whose components all share `fetcher`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConcurrency`] if `config.concurrency`
    /// is outside 1-64.
    #[instrument(level = "debug", skip(fetcher, config), fields(concurrency = config.concurrency))]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &PipelineConfig) -> Result<Self, PipelineError> {
        let concurrency = config.concurrency;
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(PipelineError::InvalidConcurrency { value: concurrency });
        }

        debug!(
            output_dir = %config.output_dir.display(),
            silent = config.output.silent,
            "creating pipeline engine"
        );

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            catalog: CatalogExtractor::new(Arc::clone(&fetcher), config.site.clone(), config.output),
            entries: Arc::new(EntryExtractor::new(
                Arc::clone(&fetcher),
                config.site.clone(),
                config.output,
            )),
            writer: Arc::new(AssetWriter::new(
                fetcher,
                config.output_dir.clone(),
                config.output,
            )),
            output: config.output,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Processes one publisher end to end.
    ///
    /// A failing entry or item is logged and recorded in the report; its
    /// siblings keep going.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] when the catalog cannot be
    /// resolved, in which case no entry is fetched.
    /// Returns [`PipelineError::SemaphoreClosed`] if the semaphore is closed.
    #[instrument(skip(self, selection))]
    pub async fn run(
        &self,
        publisher: &str,
        selection: &EntrySelection,
    ) -> Result<RunReport, PipelineError> {
        let catalog = self.catalog.fetch_catalog(publisher).await?;
        let catalog_entries = catalog.len();
        let selected = selection.apply(catalog);

        let mut report = RunReport {
            catalog_entries,
            selected_entries: selected.len(),
            ..RunReport::default()
        };

        let items = self.extract_all(publisher, selected, &mut report).await?;
        report.items_found = items.len();
        self.download_all(items, &mut report).await?;

        if self.output.announces() {
            info!(
                publisher,
                albums = report.entries_extracted,
                songs = report.items_downloaded(),
                failures = report.failures.len(),
                "run complete"
            );
        }

        Ok(report)
    }

    async fn extract_all(
        &self,
        publisher: &str,
        entries: Vec<CatalogEntry>,
        report: &mut RunReport,
    ) -> Result<Vec<DownloadableItem>, PipelineError> {
        let mut handles = Vec::with_capacity(entries.len());

        for entry in entries {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| PipelineError::SemaphoreClosed)?;

            let extractor = Arc::clone(&self.entries);
            let publisher = publisher.to_string();
            let identifier = entry.identifier.clone();

            handles.push((
                identifier,
                tokio::spawn(async move {
                    let _permit = permit;
                    extractor.extract_items(&publisher, &entry).await
                }),
            ));
        }

        let mut items = Vec::new();
        for (identifier, handle) in handles {
            match handle.await {
                Ok(Ok(found)) => {
                    report.entries_extracted += 1;
                    items.extend(found);
                }
                Ok(Err(e)) => {
                    warn!(album = %identifier, error = %e, "album extraction failed");
                    report.failures.push(UnitFailure::Entry(e));
                }
                Err(e) => {
                    warn!(album = %identifier, error = %e, "album task panicked");
                    report.failures.push(UnitFailure::Panicked {
                        stage: Stage::Extraction,
                        unit: identifier,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(items)
    }

    async fn download_all(
        &self,
        items: Vec<DownloadableItem>,
        report: &mut RunReport,
    ) -> Result<(), PipelineError> {
        let mut claimed: HashSet<PathBuf> = HashSet::with_capacity(items.len());
        let mut slots = Vec::with_capacity(items.len());

        for item in items {
            let path = self.writer.destination_path(&item);
            if !claimed.insert(path.clone()) {
                warn!(
                    song = %item.item_title,
                    album = %item.work_title,
                    path = %path.display(),
                    "song maps to an already claimed path; not downloading"
                );
                slots.push(DownloadSlot::Duplicate(UnitFailure::DuplicateDestination {
                    item: Box::new(item),
                    path,
                }));
                continue;
            }

            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| PipelineError::SemaphoreClosed)?;

            let writer = Arc::clone(&self.writer);
            let title = item.item_title.clone();

            slots.push(DownloadSlot::Spawned(
                title,
                tokio::spawn(async move {
                    let _permit = permit;
                    let result = writer.write_item(&item).await;
                    (item, result)
                }),
            ));
        }

        for slot in slots {
            let (title, handle) = match slot {
                DownloadSlot::Duplicate(failure) => {
                    report.failures.push(failure);
                    continue;
                }
                DownloadSlot::Spawned(title, handle) => (title, handle),
            };
            match handle.await {
                Ok((_, Ok(path))) => report.written.push(path),
                Ok((item, Err(e))) => {
                    warn!(song = %item.item_title, url = %item.asset_url, error = %e, "song download failed");
                    report.failures.push(UnitFailure::item(item, e));
                }
                Err(e) => {
                    warn!(song = %title, error = %e, "song task panicked");
                    report.failures.push(UnitFailure::Panicked {
                        stage: Stage::Download,
                        unit: title,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

type WriteOutcome = (DownloadableItem, Result<PathBuf, WriteError>);

/// Stage-two unit in submission order.
enum DownloadSlot {
    Spawned(String, JoinHandle<WriteOutcome>),
    Duplicate(UnitFailure),
}
