//! CLI run presenter.

use std::cell::RefCell;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use stsrun_core::{ProblemSize, ResultBundle, RunResult, StsError};
use stsrun_orchestration::{RunObserver, RunReport};

use crate::output::format_seconds;
use crate::ui::{print_error, print_header, print_success, print_warning};

const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Short label for a normalized result.
#[must_use]
pub fn outcome_label(result: &RunResult) -> &'static str {
    match (result.has_solution(), result.optimal) {
        (true, true) => "OPTIMAL",
        (true, false) => "FEASIBLE",
        (false, _) => "NO SOLUTION",
    }
}

/// Terminal presenter: a spinner per solver run and a summary per size.
pub struct CLIRunPresenter {
    verbose: bool,
    quiet: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl CLIRunPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            spinner: RefCell::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let bar = if self.quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            bar.set_style(style);
            bar.enable_steady_tick(SPINNER_TICK);
            bar
        };
        bar.set_message(message);
        if let Some(old) = self.spinner.replace(Some(bar)) {
            old.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self.spinner.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }

    /// Print the end-of-run summary. Failures were already shown as they happened.
    pub fn present_report(&self, report: &RunReport) {
        if self.quiet {
            return;
        }
        for (n, path) in &report.written {
            print_success(&format!("n = {n}: wrote {}", path.display()));
        }
        if !report.failures.is_empty() {
            let total = report.written.len() + report.failures.len();
            print_error(&format!(
                "{} of {total} sizes failed and were not written",
                report.failures.len()
            ));
        }
    }
}

impl RunObserver for CLIRunPresenter {
    fn run_started(&self, config: &str, n: ProblemSize) {
        self.start_spinner(format!("{config} (n = {n})"));
    }

    fn run_finished(&self, config: &str, result: &RunResult) {
        self.stop_spinner();
        if self.quiet {
            return;
        }
        let line = format!(
            "{config} (n = {}): {} in {}",
            result.n,
            outcome_label(result),
            format_seconds(result.time)
        );
        if result.optimal {
            print_success(&line);
        } else {
            print_warning(&line);
        }
    }

    fn batch_finished(&self, n: ProblemSize, bundle: &ResultBundle) {
        if self.quiet || !self.verbose {
            return;
        }
        print_header(&format!("n = {n}"));
        println!("  {:<20} {:>10} {:>12}", "configuration", "time", "status");
        println!("  {:-<44}", "");
        for (name, result) in bundle.iter() {
            println!(
                "  {:<20} {:>10} {:>12}",
                name,
                format_seconds(result.time),
                outcome_label(result)
            );
        }
    }

    fn batch_failed(&self, n: ProblemSize, error: &StsError) {
        self.stop_spinner();
        if !self.quiet {
            print_error(&format!("n = {n}: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn size(n: u32) -> ProblemSize {
        ProblemSize::new(n).unwrap()
    }

    fn solved(optimal: bool) -> RunResult {
        RunResult {
            solution: vec![serde_json::json!([1, 2])],
            n: 2,
            time: 1,
            optimal,
        }
    }

    #[test]
    fn labels() {
        assert_eq!(outcome_label(&solved(true)), "OPTIMAL");
        assert_eq!(outcome_label(&solved(false)), "FEASIBLE");
        assert_eq!(outcome_label(&RunResult::empty(size(2), 300)), "NO SOLUTION");
    }

    #[test]
    fn spinner_lifecycle() {
        let presenter = CLIRunPresenter::new(false, false);
        presenter.run_started("gecode", size(4));
        assert!(presenter.spinner.borrow().is_some());
        presenter.run_finished("gecode", &solved(true));
        assert!(presenter.spinner.borrow().is_none());
    }

    #[test]
    fn quiet_mode_still_tracks_runs() {
        let presenter = CLIRunPresenter::new(false, true);
        presenter.run_started("chuffed", size(2));
        presenter.batch_failed(size(2), &StsError::InvalidSize(3));
        assert!(presenter.spinner.borrow().is_none());
    }

    #[test]
    fn verbose_summary_does_not_panic() {
        let presenter = CLIRunPresenter::new(true, false);
        let mut bundle = ResultBundle::new();
        bundle.insert("gecode", solved(true));
        bundle.insert("chuffed", RunResult::empty(size(2), 300));
        presenter.batch_finished(size(2), &bundle);
    }

    #[test]
    fn present_report_does_not_panic() {
        let presenter = CLIRunPresenter::new(false, false);
        let report = RunReport {
            written: vec![(size(2), PathBuf::from("res/CP/2.json"))],
            failures: vec![(size(4), StsError::MissingOutputDirectory("res/CP".into()))],
        };
        presenter.present_report(&report);
    }
}
