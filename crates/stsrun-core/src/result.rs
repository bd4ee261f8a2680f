//! Normalized run results and per-size bundles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::size::ProblemSize;

/// Outcome of one solver invocation at one problem size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// The schedule found, empty when none was found.
    #[serde(rename = "sol")]
    pub solution: Vec<Value>,
    /// Problem size.
    pub n: u32,
    /// Elapsed seconds, or the timeout when no solution was found.
    pub time: u64,
    /// Whether the solver proved the solution optimal.
    pub optimal: bool,
}

impl RunResult {
    /// A result carrying no solution, charged the full timeout.
    #[must_use]
    pub fn empty(n: ProblemSize, timeout_secs: u64) -> Self {
        Self {
            solution: Vec::new(),
            n: n.get(),
            time: timeout_secs,
            optimal: false,
        }
    }

    #[must_use]
    pub fn has_solution(&self) -> bool {
        !self.solution.is_empty()
    }
}

/// Results for one problem size, keyed by configuration name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultBundle(BTreeMap<String, RunResult>);

impl ResultBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, result: RunResult) {
        self.0.insert(name.into(), result);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RunResult> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RunResult)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty-printed JSON document for this bundle.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_result_is_charged_timeout() {
        let r = RunResult::empty(ProblemSize::new(6).unwrap(), 300);
        assert!(r.solution.is_empty());
        assert_eq!(r.n, 6);
        assert_eq!(r.time, 300);
        assert!(!r.optimal);
        assert!(!r.has_solution());
    }

    #[test]
    fn bundle_serializes_with_sol_key() {
        let mut bundle = ResultBundle::new();
        bundle.insert(
            "gecode",
            RunResult {
                solution: vec![json!([[1, 2]])],
                n: 2,
                time: 0,
                optimal: true,
            },
        );
        let value: Value = serde_json::from_str(&bundle.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({"gecode": {"sol": [[[1, 2]]], "n": 2, "time": 0, "optimal": true}})
        );
    }

    #[test]
    fn bundle_keys_are_sorted() {
        let mut bundle = ResultBundle::new();
        let size = ProblemSize::new(2).unwrap();
        bundle.insert("gecode", RunResult::empty(size, 1));
        bundle.insert("chuffed", RunResult::empty(size, 1));
        let names: Vec<_> = bundle.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["chuffed", "gecode"]);
    }
}
