//! Orchestration interfaces.

use std::path::PathBuf;

use stsrun_core::{ProblemSize, ResultBundle, RunResult, StsError};

/// Receives progress notifications while a plan executes.
pub trait RunObserver {
    /// A solver invocation is about to start.
    fn run_started(&self, _config: &str, _n: ProblemSize) {}

    /// A solver invocation finished and was normalized.
    fn run_finished(&self, _config: &str, _result: &RunResult) {}

    /// Every configuration of a size finished.
    fn batch_finished(&self, _n: ProblemSize, _bundle: &ResultBundle) {}

    /// A size failed and produced no file.
    fn batch_failed(&self, _n: ProblemSize, _error: &StsError) {}
}

/// Null observer (does nothing).
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// Destination for per-size result bundles.
pub trait BundleSink {
    /// Persist one bundle, returning where it was written.
    fn persist(&self, n: ProblemSize, bundle: &ResultBundle) -> Result<PathBuf, StsError>;
}
