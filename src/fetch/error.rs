//! Error types for the fetch layer.
//!
//! Every variant names the URL that failed. Callers add no further context
//! beyond that; the fetch layer never retries.

use thiserror::Error;

/// Errors that can occur while fetching a page or an asset stream.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS, broken body).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The transport timed out before the response completed.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-2xx HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Classifies a reqwest error as timeout or generic network failure.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Returns the URL this error refers to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::HttpStatus { url, .. } => url,
        }
    }
}
