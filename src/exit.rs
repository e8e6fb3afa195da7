//! Exit code logic for the bandcamp-dl process.

use bandcamp_dl::{PipelineError, RunReport};

/// Process exit outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every selected unit succeeded (including nothing to do).
    Success,
    /// Usage error or startup failure.
    Failure,
    /// The publisher's catalog could not be resolved.
    CatalogUnavailable,
    /// The run finished but some albums or tracks failed.
    Partial,
}

impl ProcessExit {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::CatalogUnavailable => 2,
            Self::Partial => 3,
        }
    }
}

/// Maps a finished run to its exit outcome.
pub(crate) fn determine_exit_outcome(report: &RunReport) -> ProcessExit {
    if report.is_success() {
        ProcessExit::Success
    } else {
        ProcessExit::Partial
    }
}

/// Maps a run that stopped early to its exit outcome.
pub(crate) fn exit_for_pipeline_error(error: &PipelineError) -> ProcessExit {
    match error {
        PipelineError::Catalog(_) => ProcessExit::CatalogUnavailable,
        PipelineError::InvalidConcurrency { .. } | PipelineError::SemaphoreClosed => {
            ProcessExit::Failure
        }
    }
}
