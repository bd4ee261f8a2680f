//! Error type shared by every stsrun crate.

use std::path::PathBuf;

/// Error type for configuration, solver runs, and persistence.
#[derive(Debug, thiserror::Error)]
pub enum StsError {
    /// Problem size is zero or odd.
    #[error("n must be a positive even number, got {0}")]
    InvalidSize(u32),

    /// Configuration name is not in the table.
    #[error("unknown configuration: {0}")]
    UnknownConfiguration(String),

    /// Configuration table is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The solver binary could not be started.
    #[error("failed to launch solver `{binary}`: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while waiting on the solver.
    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the solver stream is not valid JSON.
    #[error("malformed solver record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A solution record carries no usable `sol` payload.
    #[error("malformed solution payload: {0}")]
    MalformedSolution(String),

    /// The solver emitted an `error` record.
    #[error("solver reported an error: {0}")]
    SolverReported(String),

    /// The solver exited without a solution or status record.
    #[error("solver produced no result: {stderr}")]
    NoResult { stderr: String },

    /// The output directory for result files does not exist.
    #[error("output directory {} does not exist, create it before running", .0.display())]
    MissingOutputDirectory(PathBuf),

    /// Writing a result file failed.
    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StsError {
    /// Whether this error was raised before any solver was started.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize(_) | Self::UnknownConfiguration(_) | Self::Config(_)
        )
    }
}
