//! Platform URL layout and asset format constants.
//!
//! A publisher lives at its own subdomain; the catalog root is `/music` and
//! each work has a page at `/album/<identifier>`. The base is a template so
//! tests and mirrors can point the pipeline at another host.

use thiserror::Error;
use url::Url;

/// Placeholder substituted with the publisher name.
pub const PUBLISHER_PLACEHOLDER: &str = "{publisher}";

/// Default publisher base template.
pub const DEFAULT_PUBLISHER_BASE: &str = "https://{publisher}.bandcamp.com";

/// Key of the asset URL inside each track's `file` map.
pub const ASSET_FORMAT_KEY: &str = "mp3-128";

/// Extension appended to every written item.
pub const ASSET_EXTENSION: &str = "mp3";

/// Errors building a [`SiteLayout`].
#[derive(Debug, Clone, Error)]
pub enum SiteError {
    /// The base template is missing the placeholder or is not an http(s) URL.
    #[error("invalid publisher base template '{template}': {reason}")]
    InvalidTemplate {
        /// The rejected template.
        template: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Builds catalog and entry page URLs for a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    base_template: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            base_template: DEFAULT_PUBLISHER_BASE.to_string(),
        }
    }
}

impl SiteLayout {
    /// Creates a layout from a base template containing `{publisher}`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::InvalidTemplate`] if the placeholder is missing or
    /// the template does not expand to an http(s) URL.
    pub fn new(base_template: impl Into<String>) -> Result<Self, SiteError> {
        let base_template = base_template.into();
        if !base_template.contains(PUBLISHER_PLACEHOLDER) {
            return Err(SiteError::InvalidTemplate {
                template: base_template,
                reason: format!("missing {PUBLISHER_PLACEHOLDER} placeholder"),
            });
        }

        let probe = base_template.replace(PUBLISHER_PLACEHOLDER, "probe");
        match Url::parse(&probe) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self {
                base_template: base_template.trim_end_matches('/').to_string(),
            }),
            Ok(url) => Err(SiteError::InvalidTemplate {
                reason: format!("unsupported scheme '{}'", url.scheme()),
                template: base_template,
            }),
            Err(error) => Err(SiteError::InvalidTemplate {
                reason: error.to_string(),
                template: base_template,
            }),
        }
    }

    /// Returns the expanded base URL for one publisher.
    #[must_use]
    pub fn publisher_base(&self, publisher: &str) -> String {
        self.base_template.replace(PUBLISHER_PLACEHOLDER, publisher)
    }

    /// URL of the publisher's catalog root page.
    #[must_use]
    pub fn catalog_url(&self, publisher: &str) -> String {
        format!("{}/music", self.publisher_base(publisher))
    }

    /// URL of one catalog entry's page.
    #[must_use]
    pub fn entry_url(&self, publisher: &str, identifier: &str) -> String {
        format!("{}/album/{identifier}", self.publisher_base(publisher))
    }
}

/// Extracts the identifier (last path segment) from an entry link.
///
/// Accepts relative (`/album/ep-one`) and absolute links; query strings and
/// fragments are ignored. Returns `None` when no non-empty segment remains.
#[must_use]
pub fn identifier_from_link(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
