//! Application entry point and dispatch.

use anyhow::{Context, Result};

use stsrun_cli::{CLIRunPresenter, JsonFileSink};
use stsrun_core::MinizincRunner;
use stsrun_orchestration::{Orchestrator, RunPlan};

use crate::config::AppConfig;
use crate::errors::report_exit_code;

/// Run the application, returning the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        stsrun_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(stsrun_core::exit_codes::SUCCESS);
    }

    let choice = config.choice.as_deref().context("missing configuration choice")?;
    let n = config.n.context("missing problem size")?;

    let table = config.config_table()?;
    let plan = RunPlan::from_choice(choice, n, &table)?;
    tracing::info!(
        choice,
        n,
        sizes = plan.batches().len(),
        invocations = plan.invocation_count(),
        timeout_secs = config.timeout,
        "starting run"
    );

    let runner = MinizincRunner::new(&config.solver_binary);
    let sink = JsonFileSink::new(&config.output_dir);
    let presenter = CLIRunPresenter::new(config.verbose, config.quiet);

    let report = Orchestrator::new(&table, &runner, config.timeout_duration())
        .execute(&plan, &sink, &presenter);
    presenter.present_report(&report);

    Ok(report_exit_code(&report))
}
