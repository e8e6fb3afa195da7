#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::fetch::{ByteStream, FetchError, Fetcher};

/// In-memory [`Fetcher`] serving fixed pages and assets.
///
/// Unknown URLs answer 404. Every request is recorded, and the peak number of
/// concurrent calls is tracked so tests can assert the stage ceilings.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, String>,
    assets: HashMap<String, Vec<u8>>,
    delay: Option<Duration>,
    url_delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub(crate) fn with_asset(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(url.into(), bytes.into());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delays only requests for `url`, overriding [`Self::with_delay`].
    pub(crate) fn with_url_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.url_delays.insert(url.into(), delay);
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, url: &str) {
        self.requested.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.url_delays.get(url).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.enter(url).await;
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::http_status(url, 404))
    }

    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        self.enter(url).await;
        let bytes = self
            .assets
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::http_status(url, 404))?;
        let chunks: Vec<Result<Vec<u8>, FetchError>> = bytes
            .chunks(4)
            .map(|chunk| Ok(chunk.to_vec()))
            .collect();
        Ok(futures_util::stream::iter(chunks).boxed())
    }
}
