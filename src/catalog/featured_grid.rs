//! Structural strategy: the rendered music grid.
//!
//! The grid renders one `<li>` per work with a knockout `data-bind` marker and
//! a single anchor inside. Newer works show up here; the grid stops rendering
//! past a size threshold, so it is never the whole catalog on large pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::trace;

use super::{CatalogEntry, CatalogStrategy};
use crate::html::{collapsed_text, compile_static_selector, first_direct_text};
use crate::site::identifier_from_link;

static GRID_ANCHOR: LazyLock<Selector> = LazyLock::new(|| {
    compile_static_selector(r#"[data-bind="css: {'featured': featured()}"] > a"#)
});
static TITLE_PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| compile_static_selector("p"));

/// Reads entries from the anchor-per-work grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeaturedGridStrategy;

impl CatalogStrategy for FeaturedGridStrategy {
    fn name(&self) -> &'static str {
        "featured-grid"
    }

    fn extract(&self, document: &Html) -> Option<Vec<CatalogEntry>> {
        let entries: Vec<CatalogEntry> = document
            .select(&GRID_ANCHOR)
            .filter_map(|anchor| {
                let Some(identifier) = anchor.value().attr("href").and_then(identifier_from_link)
                else {
                    trace!("grid anchor without usable href");
                    return None;
                };
                let title = anchor
                    .select(&TITLE_PARAGRAPH)
                    .next()
                    .and_then(first_direct_text)
                    .unwrap_or_else(|| collapsed_text(anchor));
                Some(CatalogEntry::new(identifier, title))
            })
            .collect();

        (!entries.is_empty()).then_some(entries)
    }
}
