//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use stsrun_core::{
    ConfigTable, StsError, DEFAULT_OUTPUT_DIR, DEFAULT_SOLVER_BINARY, DEFAULT_TIMEOUT_SECS,
};

/// stsrun — run the Sports Timetabling Scheduling model through MiniZinc solvers.
#[derive(Parser, Debug)]
#[command(name = "stsrun", version, about)]
pub struct AppConfig {
    /// Configuration to run: a configuration name, `all_models`, or `all_models_up_to_n`.
    #[arg(required_unless_present = "completion")]
    pub choice: Option<String>,

    /// Number of teams (must be even).
    #[arg(required_unless_present = "completion")]
    pub n: Option<u32>,

    /// Per-solver timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "STSRUN_TIMEOUT")]
    pub timeout: u64,

    /// MiniZinc executable.
    #[arg(long, default_value = DEFAULT_SOLVER_BINARY, env = "STSRUN_SOLVER_BINARY")]
    pub solver_binary: PathBuf,

    /// Directory receiving one `<n>.json` file per problem size.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, env = "STSRUN_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Directory relative model paths are resolved against.
    #[arg(long, env = "STSRUN_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// JSON file replacing the built-in configuration table.
    #[arg(long)]
    pub configs: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (no progress or summaries).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Build the configuration table from `--configs` and `--model-dir`.
    pub fn config_table(&self) -> Result<ConfigTable, StsError> {
        let table = match &self.configs {
            Some(path) => ConfigTable::from_json_file(path)?,
            None => ConfigTable::builtin(),
        };
        Ok(match &self.model_dir {
            Some(dir) => table.with_model_dir(dir),
            None => table,
        })
    }
}
