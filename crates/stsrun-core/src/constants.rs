//! Constants for solver invocation, persistence, and mode selection.

/// Default per-invocation solver timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default solver executable, looked up on `PATH`.
pub const DEFAULT_SOLVER_BINARY: &str = "minizinc";

/// Default directory receiving one result file per problem size.
pub const DEFAULT_OUTPUT_DIR: &str = "../../res/CP";

/// Model file shared by the built-in configurations.
pub const DEFAULT_MODEL_FILE: &str = "STS_model.mzn";

/// Mode choice running every known configuration at a single size.
pub const ALL_MODELS: &str = "all_models";

/// Mode choice running every known configuration at every even size up to n.
pub const ALL_MODELS_UP_TO_N: &str = "all_models_up_to_n";

/// Name of the model parameter bound to the problem size.
pub const SIZE_PARAMETER: &str = "n";

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error, including a failed batch or write.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid input or configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// The output directory does not exist.
    pub const ERROR_OUTPUT_DIR: i32 = 5;
}
