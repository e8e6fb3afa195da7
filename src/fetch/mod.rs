//! Page and asset retrieval.
//!
//! The [`Fetcher`] trait is the capability boundary to the network: catalog
//! and entry extraction only ever need `fetch(url) -> text`, and the asset
//! writer needs `fetch(url) -> byte stream`. [`HttpClient`] is the production
//! implementation; tests substitute in-process doubles.
//!
//! No caching and no retries happen at this layer.

mod client;
mod constants;
mod error;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::FetchError;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// Response body as a stream of owned chunks.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, FetchError>>;

/// Read-only GET access to the platform.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on invalid URL, transport failure, timeout, or
    /// non-2xx status.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Fetches an asset and returns its body as a byte stream.
    ///
    /// The status is checked before the stream is returned; chunk-level
    /// transport failures surface as `Err` items.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_text`](Self::fetch_text).
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError>;
}
