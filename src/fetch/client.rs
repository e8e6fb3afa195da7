//! reqwest-backed [`Fetcher`] implementation.
//!
//! One `HttpClient` is built per run and shared by every pipeline unit so
//! connections are pooled across catalog, entry, and asset requests.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::FetchError;
use super::{ByteStream, Fetcher};
use crate::user_agent;

/// HTTP client for page and asset retrieval.
///
/// Cloning is cheap; the inner reqwest client is reference counted.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default timeouts (30s connect, 5min read).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error when the TLS backend or system
    /// configuration cannot be initialised.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client })
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send_get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        debug!(bytes = body.len(), "page fetched");
        Ok(body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        let response = self.send_get(url).await?;
        let url = url.to_string();
        let stream = response.bytes_stream().map(move |chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| FetchError::transport(url.clone(), e))
        });
        Ok(stream.boxed())
    }
}
