//! Catalog discovery for one publisher.
//!
//! The catalog root page is read by two independent strategies whose
//! windows over the catalog only partly overlap:
//!
//! - [`FeaturedGridStrategy`] - the rendered grid (newest works, truncated)
//! - [`ClientItemsStrategy`] - the embedded JSON payload (older works)
//!
//! Their outputs are unioned into a [`CatalogListing`]. When no strategy
//! applies, discovery fails with [`CatalogError::Unavailable`].

mod client_items;
mod error;
mod featured_grid;
mod strategy;

pub use client_items::ClientItemsStrategy;
pub use error::CatalogError;
pub use featured_grid::FeaturedGridStrategy;
pub use strategy::{CatalogListing, CatalogStrategy};

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, instrument};

use crate::config::OutputSettings;
use crate::fetch::Fetcher;
use crate::site::SiteLayout;

/// One work in a publisher's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// URL-path-safe token, last segment of the work's page URL.
    pub identifier: String,
    /// Display title.
    pub title: String,
}

impl CatalogEntry {
    /// Creates an entry.
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
        }
    }
}

/// Returns the strategies in merge order: grid first, then embedded data.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn CatalogStrategy>> {
    vec![Box::new(FeaturedGridStrategy), Box::new(ClientItemsStrategy)]
}

/// Fetches a publisher's root page and builds the canonical entry list.
pub struct CatalogExtractor {
    fetcher: Arc<dyn Fetcher>,
    site: SiteLayout,
    strategies: Vec<Box<dyn CatalogStrategy>>,
    output: OutputSettings,
}

impl std::fmt::Debug for CatalogExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("CatalogExtractor")
            .field("site", &self.site)
            .field("strategies", &names)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl CatalogExtractor {
    /// Creates an extractor with the default strategies.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, site: SiteLayout, output: OutputSettings) -> Self {
        Self::with_strategies(fetcher, site, default_strategies(), output)
    }

    /// Creates an extractor with an explicit strategy list (merge order).
    #[must_use]
    pub fn with_strategies(
        fetcher: Arc<dyn Fetcher>,
        site: SiteLayout,
        strategies: Vec<Box<dyn CatalogStrategy>>,
        output: OutputSettings,
    ) -> Self {
        Self {
            fetcher,
            site,
            strategies,
            output,
        }
    }

    /// Runs every strategy against one root page body.
    #[must_use]
    pub fn extract_listing(&self, body: &str) -> CatalogListing {
        let document = Html::parse_document(body);
        CatalogListing::from_strategy_results(self.strategies.iter().map(|strategy| {
            let found = strategy.extract(&document);
            debug!(
                strategy = strategy.name(),
                applicable = found.is_some(),
                entries = found.as_ref().map_or(0, Vec::len),
                "catalog strategy finished"
            );
            found
        }))
    }

    /// Fetches the root page and returns the tagged listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fetch`] when the root page cannot be fetched.
    #[instrument(skip(self))]
    pub async fn fetch_listing(&self, publisher: &str) -> Result<CatalogListing, CatalogError> {
        let url = self.site.catalog_url(publisher);
        let body = self.fetcher.fetch_text(&url).await?;
        Ok(self.extract_listing(&body))
    }

    /// Fetches the catalog as a flat entry list.
    ///
    /// An applicable-but-empty listing yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] when no strategy applies and
    /// [`CatalogError::Fetch`] when the root page cannot be fetched.
    pub async fn fetch_catalog(&self, publisher: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let entries = match self.fetch_listing(publisher).await? {
            CatalogListing::Unavailable => return Err(CatalogError::unavailable(publisher)),
            CatalogListing::Empty => Vec::new(),
            CatalogListing::Entries(entries) => entries,
        };

        if self.output.announces() {
            let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
            info!(
                publisher,
                count = entries.len(),
                titles = %titles.join(", "),
                "[Fetched] Available albums"
            );
        }

        Ok(entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::test_support::fetcher::StaticFetcher;

    const PUBLISHER: &str = "indie-label";

    fn catalog_url() -> String {
        SiteLayout::default().catalog_url(PUBLISHER)
    }

    fn extractor(fetcher: StaticFetcher) -> CatalogExtractor {
        CatalogExtractor::new(
            Arc::new(fetcher),
            SiteLayout::default(),
            OutputSettings::silent(),
        )
    }

    const GRID_AND_DATA_PAGE: &str = r#"
        <ol class="music-grid" data-client-items="[{&quot;title&quot;:&quot;Old&quot;,&quot;page_url&quot;:&quot;/album/old&quot;}]">
          <li data-bind="css: {'featured': featured()}"><a href="/album/new"><p>New</p></a></li>
        </ol>
    "#;

    #[tokio::test]
    async fn test_fetch_catalog_unions_grid_then_embedded_data() {
        let fetcher = StaticFetcher::new().with_page(catalog_url(), GRID_AND_DATA_PAGE);
        let entries = extractor(fetcher).fetch_catalog(PUBLISHER).await.unwrap();
        assert_eq!(
            entries,
            vec![CatalogEntry::new("new", "New"), CatalogEntry::new("old", "Old")]
        );
    }

    #[tokio::test]
    async fn test_fetch_catalog_without_any_strategy_is_unavailable() {
        let fetcher = StaticFetcher::new().with_page(catalog_url(), "<html><body>404</body></html>");
        let result = extractor(fetcher).fetch_catalog(PUBLISHER).await;
        assert!(matches!(result, Err(CatalogError::Unavailable { publisher }) if publisher == PUBLISHER));
    }

    #[tokio::test]
    async fn test_fetch_catalog_propagates_fetch_error() {
        let fetcher = StaticFetcher::new();
        let result = extractor(fetcher).fetch_catalog(PUBLISHER).await;
        assert!(matches!(
            result,
            Err(CatalogError::Fetch(FetchError::HttpStatus { status: 404, .. }))
        ));
    }

    #[tokio::test]
    async fn test_fetch_listing_requests_music_page() {
        let fetcher = Arc::new(StaticFetcher::new().with_page(catalog_url(), GRID_AND_DATA_PAGE));
        let extractor = CatalogExtractor::new(
            fetcher.clone(),
            SiteLayout::default(),
            OutputSettings::silent(),
        );
        let listing = extractor.fetch_listing(PUBLISHER).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(fetcher.requested(), vec![catalog_url()]);
    }

    struct EmptyButApplicable;

    impl CatalogStrategy for EmptyButApplicable {
        fn name(&self) -> &'static str {
            "empty"
        }

        fn extract(&self, _document: &Html) -> Option<Vec<CatalogEntry>> {
            Some(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_applicable_empty_listing_is_an_empty_catalog() {
        let fetcher = StaticFetcher::new().with_page(catalog_url(), "<html></html>");
        let extractor = CatalogExtractor::with_strategies(
            Arc::new(fetcher),
            SiteLayout::default(),
            vec![Box::new(EmptyButApplicable)],
            OutputSettings::silent(),
        );
        assert_eq!(extractor.fetch_listing(PUBLISHER).await.unwrap(), CatalogListing::Empty);
        assert!(extractor.fetch_catalog(PUBLISHER).await.unwrap().is_empty());
    }
}
