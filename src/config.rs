//! Run configuration threaded through the pipeline components.
//!
//! The silence flag is an explicit value handed to each component instead of
//! a process-wide switch; `main` builds it once from the environment and CLI.

use std::path::PathBuf;

use crate::fetch::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::pipeline::DEFAULT_CONCURRENCY;
use crate::site::SiteLayout;

/// Environment variable that suppresses informational output.
pub const SILENT_ENV_VAR: &str = "BDL_SILENT";

/// Environment variable overriding the publisher base template.
pub const BASE_URL_ENV_VAR: &str = "BDL_BASE_URL";

/// Controls whether components announce progress.
///
/// Errors and per-unit failures are always reported; only the
/// "fetched"/"downloaded" lines are suppressed when `silent` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Suppress informational lines.
    pub silent: bool,
}

impl OutputSettings {
    /// Settings with informational output enabled.
    #[must_use]
    pub fn announcing() -> Self {
        Self { silent: false }
    }

    /// Settings with informational output suppressed.
    #[must_use]
    pub fn silent() -> Self {
        Self { silent: true }
    }

    /// Reads [`SILENT_ENV_VAR`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            silent: parse_silent_flag(std::env::var(SILENT_ENV_VAR).ok().as_deref()),
        }
    }

    /// Returns true when informational lines should be emitted.
    #[must_use]
    pub fn announces(self) -> bool {
        !self.silent
    }
}

/// Interprets the silence variable.
///
/// A leading integer decides (`0` is false, anything else true), so `1`,
/// `2`, and `1abc` all silence output. `true`/`yes`/`on` are accepted too.
/// Unset or unparseable values leave output enabled.
#[must_use]
pub fn parse_silent_flag(value: Option<&str>) -> bool {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return false;
    };

    let digits_end = value
        .char_indices()
        .find(|(index, ch)| !(ch.is_ascii_digit() || (*index == 0 && matches!(*ch, '-' | '+'))))
        .map_or(value.len(), |(index, _)| index);
    if let Ok(number) = value[..digits_end].parse::<i64>() {
        return number != 0;
    }

    // Word forms are an extension; a plain integer parse would treat `true` as unset.
    matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "on")
}

/// Everything one pipeline run needs besides the fetcher.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ceiling on in-flight units per stage.
    pub concurrency: usize,
    /// Root directory the `<owner>/<work>/<item>` tree is written under.
    pub output_dir: PathBuf,
    /// URL layout of the platform.
    pub site: SiteLayout,
    /// Informational output switch.
    pub output: OutputSettings,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            output_dir: PathBuf::from("."),
            site: SiteLayout::default(),
            output: OutputSettings::default(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}
