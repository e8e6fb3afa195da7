//! Per-entry metadata extraction.
//!
//! An entry page declares its owner in the band-name header and carries the
//! full track list as JSON in `script[data-tralbum]`. Each track with a
//! resolvable asset URL becomes one [`DownloadableItem`]; tracks without one
//! are omitted silently.

mod error;
mod tralbum;

pub use error::ExtractionError;

use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use crate::catalog::CatalogEntry;
use crate::config::OutputSettings;
use crate::fetch::Fetcher;
use crate::html::{collapsed_text, compile_static_selector};
use crate::site::{ASSET_FORMAT_KEY, SiteLayout};
use tralbum::TralbumData;

const TRALBUM_ATTR: &str = "data-tralbum";

static OWNER_NAME: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("#band-name-location .title"));
static TRALBUM_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("script[data-tralbum]"));

/// One downloadable unit belonging to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadableItem {
    /// Owner name as declared on the entry page.
    pub owner_name: String,
    /// Title of the containing work (the catalog entry's title).
    pub work_title: String,
    /// Title of the item itself.
    pub item_title: String,
    /// Resolved asset URL, never empty.
    pub asset_url: String,
}

/// Parses one entry page body into its items.
///
/// # Errors
///
/// Returns [`ExtractionError::MissingOwnerName`],
/// [`ExtractionError::MissingItemList`], or
/// [`ExtractionError::MalformedItemList`] naming `entry`.
pub fn parse_entry_page(
    entry: &CatalogEntry,
    body: &str,
) -> Result<Vec<DownloadableItem>, ExtractionError> {
    let document = Html::parse_document(body);

    let owner_name = document
        .select(&OWNER_NAME)
        .next()
        .map(collapsed_text)
        .ok_or_else(|| ExtractionError::missing_owner_name(&entry.identifier))?;

    let payload = document
        .select(&TRALBUM_SCRIPT)
        .next()
        .and_then(|script| script.value().attr(TRALBUM_ATTR))
        .ok_or_else(|| ExtractionError::missing_item_list(&entry.identifier))?;

    let data: TralbumData = serde_json::from_str(payload)
        .map_err(|e| ExtractionError::malformed_item_list(&entry.identifier, e))?;

    let items = data
        .trackinfo
        .iter()
        .filter_map(|track| {
            let title = track.display_title();
            let Some(asset_url) = track.asset_url(ASSET_FORMAT_KEY) else {
                debug!(entry = %entry.identifier, track = %title, "no asset URL; skipping track");
                return None;
            };
            Some(DownloadableItem {
                owner_name: owner_name.clone(),
                work_title: entry.title.clone(),
                item_title: title,
                asset_url: asset_url.to_string(),
            })
        })
        .collect();

    Ok(items)
}

/// Fetches entry pages and extracts their items.
pub struct EntryExtractor {
    fetcher: Arc<dyn Fetcher>,
    site: SiteLayout,
    output: OutputSettings,
}

impl std::fmt::Debug for EntryExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryExtractor")
            .field("site", &self.site)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl EntryExtractor {
    /// Creates an extractor.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, site: SiteLayout, output: OutputSettings) -> Self {
        Self {
            fetcher,
            site,
            output,
        }
    }

    /// Fetches one entry's page and returns its items in page order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Fetch`] when the page cannot be fetched, or
    /// any error from [`parse_entry_page`].
    #[instrument(skip(self, entry), fields(entry = %entry.identifier))]
    pub async fn extract_items(
        &self,
        publisher: &str,
        entry: &CatalogEntry,
    ) -> Result<Vec<DownloadableItem>, ExtractionError> {
        let url = self.site.entry_url(publisher, &entry.identifier);
        let body = self
            .fetcher
            .fetch_text(&url)
            .await
            .map_err(|e| ExtractionError::fetch(&entry.identifier, e))?;

        let items = parse_entry_page(entry, &body)?;

        if self.output.announces() {
            let titles: Vec<&str> = items.iter().map(|item| item.item_title.as_str()).collect();
            info!(
                album = %entry.title,
                count = items.len(),
                titles = %titles.join(", "),
                "[Fetched] Available songs"
            );
        }

        Ok(items)
    }
}
