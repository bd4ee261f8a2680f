//! Core orchestration: sequential batch execution and per-size persistence.

use std::path::PathBuf;
use std::time::Duration;

use stsrun_core::{normalize, ConfigTable, ProblemSize, ResultBundle, SolverRunner, StsError};

use crate::interfaces::{BundleSink, RunObserver};
use crate::selection::RunPlan;

/// Outcome of executing a whole plan.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Result files written, in plan order.
    pub written: Vec<(ProblemSize, PathBuf)>,
    /// Sizes that produced no file and why.
    pub failures: Vec<(ProblemSize, StsError)>,
}

impl RunReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs configurations from a table through a solver runner, one at a time.
pub struct Orchestrator<'a> {
    table: &'a ConfigTable,
    runner: &'a dyn SolverRunner,
    timeout: Duration,
}

impl<'a> Orchestrator<'a> {
    #[must_use]
    pub fn new(table: &'a ConfigTable, runner: &'a dyn SolverRunner, timeout: Duration) -> Self {
        Self {
            table,
            runner,
            timeout,
        }
    }

    /// Run every configuration in `names` at size `n`.
    ///
    /// The first failing configuration aborts the batch.
    pub fn run_batch(
        &self,
        names: &[String],
        n: ProblemSize,
        observer: &dyn RunObserver,
    ) -> Result<ResultBundle, StsError> {
        let timeout_secs = self.timeout.as_secs();
        let mut bundle = ResultBundle::new();
        for name in names {
            let config = self.table.get(name)?;
            observer.run_started(name, n);
            let raw = self.runner.run(config, n, self.timeout)?;
            let result = normalize(&raw, n, timeout_secs)?;
            tracing::debug!(
                config = %name,
                %n,
                time = result.time,
                optimal = result.optimal,
                "run normalized"
            );
            observer.run_finished(name, &result);
            bundle.insert(name.as_str(), result);
        }
        Ok(bundle)
    }

    /// Execute every batch of `plan`, persisting each size independently.
    ///
    /// A failed batch or write is recorded and the next size still runs.
    pub fn execute(
        &self,
        plan: &RunPlan,
        sink: &dyn BundleSink,
        observer: &dyn RunObserver,
    ) -> RunReport {
        let mut report = RunReport::default();
        for batch in plan.batches() {
            let outcome = self
                .run_batch(&batch.configs, batch.n, observer)
                .and_then(|bundle| {
                    observer.batch_finished(batch.n, &bundle);
                    sink.persist(batch.n, &bundle)
                });
            match outcome {
                Ok(path) => {
                    tracing::info!(n = %batch.n, path = %path.display(), "results written");
                    report.written.push((batch.n, path));
                }
                Err(e) => {
                    tracing::error!(n = %batch.n, "size failed: {e}");
                    observer.batch_failed(batch.n, &e);
                    report.failures.push((batch.n, e));
                }
            }
        }
        report
    }
}
