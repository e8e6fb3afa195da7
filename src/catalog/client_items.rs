//! Embedded-data strategy: the `data-client-items` JSON payload.
//!
//! The music page ships older works as a JSON array on the grid's `<ol>` for
//! client-side rendering. Newer works are usually absent from it.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CatalogEntry, CatalogStrategy};
use crate::html::compile_static_selector;
use crate::site::identifier_from_link;

const CLIENT_ITEMS_ATTR: &str = "data-client-items";

static CLIENT_ITEMS_LIST: LazyLock<Selector> =
    LazyLock::new(|| compile_static_selector("ol[data-client-items]"));

#[derive(Debug, Deserialize)]
struct ClientItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    page_url: Option<String>,
}

/// Reads entries from the JSON carried by `ol[data-client-items]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientItemsStrategy;

impl CatalogStrategy for ClientItemsStrategy {
    fn name(&self) -> &'static str {
        "client-items"
    }

    fn extract(&self, document: &Html) -> Option<Vec<CatalogEntry>> {
        let payload = document
            .select(&CLIENT_ITEMS_LIST)
            .next()?
            .value()
            .attr(CLIENT_ITEMS_ATTR)?;

        let items: Vec<ClientItem> = match serde_json::from_str(payload) {
            Ok(items) => items,
            Err(error) => {
                warn!(error = %error, "client items payload is not a JSON list; ignoring it");
                return None;
            }
        };

        let entries: Vec<CatalogEntry> = items
            .into_iter()
            .filter_map(|item| {
                let Some(identifier) = item.page_url.as_deref().and_then(identifier_from_link)
                else {
                    debug!(title = ?item.title, "client item without page_url");
                    return None;
                };
                let title = item.title.unwrap_or_else(|| identifier.clone());
                Some(CatalogEntry::new(identifier, title))
            })
            .collect();

        (!entries.is_empty()).then_some(entries)
    }
}
