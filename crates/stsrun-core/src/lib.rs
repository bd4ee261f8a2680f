//! # stsrun-core
//!
//! Core library for the STS run orchestrator: solver configurations,
//! validated problem sizes, the external solver runner, and normalization
//! of the solver's JSON stream into uniform run results.

pub mod config;
pub mod constants;
pub mod error;
pub mod normalizer;
pub mod result;
pub mod runner;
pub mod size;

// Re-exports
pub use config::{ConfigTable, SolverConfig};
pub use constants::{exit_codes, DEFAULT_OUTPUT_DIR, DEFAULT_SOLVER_BINARY, DEFAULT_TIMEOUT_SECS};
pub use error::StsError;
pub use normalizer::normalize;
pub use result::{ResultBundle, RunResult};
pub use runner::{MinizincRunner, RawRun, SolverRunner};
pub use size::ProblemSize;
