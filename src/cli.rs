//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use bandcamp_dl::DEFAULT_CONCURRENCY;

/// Download a Bandcamp artist's or label's albums as MP3 files.
///
/// Pass the publisher subdomain (the `name` in `name.bandcamp.com`), optionally
/// followed by album identifiers to limit the run to those albums. Files land
/// in `<output-dir>/<artist>/<album>/<track>.mp3`.
#[derive(Parser, Debug)]
#[command(name = "bandcamp-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Publisher subdomain, then optional album identifiers
    #[arg(value_name = "PUBLISHER [ALBUM]...")]
    pub targets: Vec<String>,

    /// Directory the artist/album tree is written under
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum concurrent album or track requests (1-64)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub concurrency: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress fetched/downloaded progress lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Splits the positional arguments into publisher and album identifiers.
    ///
    /// Returns `None` when no positional argument was given.
    #[must_use]
    pub fn publisher_and_albums(&self) -> Option<(&str, Vec<String>)> {
        let (publisher, albums) = self.targets.split_first()?;
        Some((publisher.as_str(), albums.to_vec()))
    }
}
