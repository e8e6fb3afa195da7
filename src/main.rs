//! CLI entry point for bandcamp-dl.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, error, info};

use bandcamp_dl::{
    BASE_URL_ENV_VAR, EntrySelection, HttpClient, OutputSettings, PipelineConfig, PipelineEngine,
    SiteLayout,
};

mod cli;
mod exit;

use cli::Args;
use exit::{ProcessExit, determine_exit_outcome, exit_for_pipeline_error};

#[tokio::main]
async fn main() {
    let outcome = match run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("[Aborted] {e:#}");
            ProcessExit::Failure
        }
    };
    std::process::exit(outcome.code());
}

async fn run() -> Result<ProcessExit> {
    // Parse CLI arguments first (before tracing, so --help works without logs).
    // clap's own usage exit code collides with the catalog-unavailable code.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ProcessExit::Success,
                _ => ProcessExit::Failure,
            });
        }
    };

    let output = OutputSettings {
        silent: args.quiet || OutputSettings::from_env().silent,
    };
    init_tracing(default_log_level(output, args.verbose));
    debug!(?args, "CLI arguments parsed");

    let Some((publisher, albums)) = args.publisher_and_albums() else {
        error!("[Aborted] No parameters provided");
        return Ok(ProcessExit::Failure);
    };

    let site = match std::env::var(BASE_URL_ENV_VAR) {
        Ok(template) if !template.trim().is_empty() => {
            SiteLayout::new(template.trim()).context("invalid BDL_BASE_URL")?
        }
        _ => SiteLayout::default(),
    };

    let config = PipelineConfig {
        concurrency: usize::from(args.concurrency),
        output_dir: args.output_dir.clone(),
        site,
        output,
        ..PipelineConfig::default()
    };

    let client = HttpClient::with_timeouts(config.connect_timeout_secs, config.read_timeout_secs)
        .context("failed to build HTTP client")?;
    let engine = PipelineEngine::new(Arc::new(client), &config)?;
    let selection = EntrySelection::from_identifiers(albums);

    if output.announces() {
        info!(publisher, output_dir = %config.output_dir.display(), "bandcamp-dl starting");
    }

    match engine.run(publisher, &selection).await {
        Ok(report) => {
            if let Some(failure) = report.first_failure() {
                error!(
                    failed = report.failures.len(),
                    first = %failure,
                    "run finished with failures"
                );
            }
            Ok(determine_exit_outcome(&report))
        }
        Err(e) => {
            error!("[Aborted] {e}");
            Ok(exit_for_pipeline_error(&e))
        }
    }
}

/// Priority: `RUST_LOG` env var > quiet/silent > verbose flag > default (info).
fn default_log_level(output: OutputSettings, verbose: u8) -> &'static str {
    if output.silent {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
