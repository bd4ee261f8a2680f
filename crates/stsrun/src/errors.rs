//! Error handling and exit codes.

use stsrun_core::exit_codes;
use stsrun_core::StsError;
use stsrun_orchestration::RunReport;

/// Map an error to the process exit code.
#[must_use]
pub fn handle_error(err: &StsError) -> i32 {
    match err {
        StsError::InvalidSize(_) | StsError::UnknownConfiguration(_) | StsError::Config(_) => {
            exit_codes::ERROR_CONFIG
        }
        StsError::MissingOutputDirectory(_) => exit_codes::ERROR_OUTPUT_DIR,
        StsError::Launch { .. }
        | StsError::Io(_)
        | StsError::MalformedRecord { .. }
        | StsError::MalformedSolution(_)
        | StsError::SolverReported(_)
        | StsError::NoResult { .. }
        | StsError::Persist { .. } => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for a top-level error, using the typed code when available.
#[must_use]
pub fn handle_anyhow(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<StsError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

/// Exit code for a finished run: the code of its first failure, if any.
#[must_use]
pub fn report_exit_code(report: &RunReport) -> i32 {
    report
        .failures
        .first()
        .map_or(exit_codes::SUCCESS, |(_, err)| handle_error(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stsrun_core::ProblemSize;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&StsError::InvalidSize(3)), 4);
        assert_eq!(handle_error(&StsError::UnknownConfiguration("x".into())), 4);
        assert_eq!(
            handle_error(&StsError::MissingOutputDirectory(PathBuf::from("res"))),
            5
        );
        assert_eq!(handle_error(&StsError::SolverReported("boom".into())), 1);
    }

    #[test]
    fn anyhow_downcast() {
        let err = anyhow::Error::new(StsError::InvalidSize(7));
        assert_eq!(handle_anyhow(&err), 4);
        assert_eq!(handle_anyhow(&anyhow::anyhow!("other")), 1);
    }

    #[test]
    fn report_codes() {
        let mut report = RunReport::default();
        assert_eq!(report_exit_code(&report), 0);
        report.failures.push((
            ProblemSize::new(2).unwrap(),
            StsError::MissingOutputDirectory(PathBuf::from("res")),
        ));
        assert_eq!(report_exit_code(&report), 5);
    }
}
