//! Normalization of the MiniZinc `--json-stream` output into a [`RunResult`].
//!
//! Each non-blank line is one record. Solution records set a provisional
//! optimal result, status records confirm, downgrade, or clear it.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StsError;
use crate::result::RunResult;
use crate::runner::RawRun;
use crate::size::ProblemSize;

/// One line of the solver stream.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Solution {
        #[serde(default)]
        output: SolutionOutput,
    },
    Status {
        status: SolveStatus,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        what: Option<String>,
    },
    Warning {
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct SolutionOutput {
    #[serde(default)]
    json: Option<Value>,
    #[serde(default)]
    default: Option<String>,
}

/// Terminal status reported by the solver.
///
/// Only the statuses that change a result are named; everything else
/// (`ALL_SOLUTIONS`, `UNBOUNDED`, `ERROR`, ...) downgrades a kept solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    OptimalSolution,
    Unsatisfiable,
    Unknown,
    #[serde(other)]
    Other,
}

impl SolveStatus {
    /// Statuses after which no solution is kept.
    #[must_use]
    pub fn clears_solution(self) -> bool {
        matches!(self, Self::Unsatisfiable | Self::Unknown)
    }
}

/// Extract the `sol` array from a solution record's output sections.
fn extract_solution(output: SolutionOutput) -> Result<Vec<Value>, StsError> {
    let document = match (output.json, output.default) {
        (Some(json), _) => json,
        (None, Some(text)) => serde_json::from_str(text.trim()).map_err(|e| {
            StsError::MalformedSolution(format!("default output is not JSON: {e}"))
        })?,
        (None, None) => {
            return Err(StsError::MalformedSolution(
                "solution record has no output".into(),
            ))
        }
    };
    match document {
        Value::Object(mut fields) => match fields.remove("sol") {
            Some(Value::Array(sol)) => Ok(sol),
            Some(other) => Err(StsError::MalformedSolution(format!(
                "`sol` is not an array: {other}"
            ))),
            None => Err(StsError::MalformedSolution("missing `sol` field".into())),
        },
        other => Err(StsError::MalformedSolution(format!(
            "output is not an object: {other}"
        ))),
    }
}

/// Turn one raw solver run into exactly one [`RunResult`].
///
/// `timeout_secs` is charged as the time of every run that ends without a
/// solution.
pub fn normalize(raw: &RawRun, n: ProblemSize, timeout_secs: u64) -> Result<RunResult, StsError> {
    if raw.timed_out {
        return Ok(RunResult::empty(n, timeout_secs));
    }

    let mut result: Option<RunResult> = None;
    let mut solution_seen = false;
    for (idx, line) in raw.stdout.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line)
            .map_err(|source| StsError::MalformedRecord { line: idx + 1, source })?;
        match record {
            Record::Solution { output } => {
                result = Some(RunResult {
                    solution: extract_solution(output)?,
                    n: n.get(),
                    time: raw.elapsed_secs,
                    optimal: true,
                });
                solution_seen = true;
            }
            Record::Status { status } if status.clears_solution() => {
                result = Some(RunResult::empty(n, timeout_secs));
                solution_seen = false;
            }
            Record::Status { status } => {
                let current = result.get_or_insert_with(|| RunResult::empty(n, timeout_secs));
                current.optimal = solution_seen && status == SolveStatus::OptimalSolution;
            }
            Record::Error { message, what } => {
                let message = message.or(what).unwrap_or_else(|| "unspecified error".into());
                return Err(StsError::SolverReported(message));
            }
            Record::Warning { message } => {
                tracing::warn!(%n, "solver warning: {}", message.unwrap_or_default());
            }
            Record::Other => {}
        }
    }

    result.ok_or_else(|| StsError::NoResult {
        stderr: raw.stderr.trim().to_string(),
    })
}
