//! Catalog-to-disk orchestration.

mod engine;
mod error;
mod report;

pub use engine::{DEFAULT_CONCURRENCY, EntrySelection, PipelineEngine};
pub use error::{PipelineError, Stage, UnitFailure};
pub use report::RunReport;
