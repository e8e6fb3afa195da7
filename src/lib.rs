//! Bandcamp Downloader Library
//!
//! Mirrors a publisher's public catalog to disk: discover the albums on the
//! publisher's music page, extract each album's tracks, then stream every
//! track into `<output>/<artist>/<album>/<track>.mp3`.
//!
//! # Architecture
//!
//! - [`fetch`] - HTTP retrieval behind the [`Fetcher`] trait
//! - [`catalog`] - Album discovery with pluggable page strategies
//! - [`entry`] - Per-album track extraction
//! - [`download`] - Filename sanitization and streaming writes
//! - [`pipeline`] - Two-stage bounded fan-out tying the above together
//! - [`config`] and [`site`] - Run settings and platform URL layout

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod download;
pub mod entry;
pub mod fetch;
pub(crate) mod html;
pub mod pipeline;
pub mod site;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use catalog::{CatalogEntry, CatalogError, CatalogExtractor, CatalogListing, CatalogStrategy};
pub use config::{BASE_URL_ENV_VAR, OutputSettings, PipelineConfig, SILENT_ENV_VAR};
pub use download::{AssetWriter, WriteError};
pub use entry::{DownloadableItem, EntryExtractor, ExtractionError};
pub use fetch::{FetchError, Fetcher, HttpClient};
pub use pipeline::{
    DEFAULT_CONCURRENCY, EntrySelection, PipelineEngine, PipelineError, RunReport, UnitFailure,
};
pub use site::{SiteError, SiteLayout};
