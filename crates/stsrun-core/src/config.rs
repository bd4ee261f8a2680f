//! Solver configuration table.
//!
//! A configuration pairs a MiniZinc model with the solver that runs it. The
//! table is built once at startup and passed by reference to everything that
//! needs it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::constants::{ALL_MODELS, ALL_MODELS_UP_TO_N, DEFAULT_MODEL_FILE};
use crate::error::StsError;

/// One named model/solver pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolverConfig {
    /// Path to the `.mzn` model.
    pub model: PathBuf,
    /// Solver identifier passed to `--solver`.
    pub solver: String,
}

impl SolverConfig {
    #[must_use]
    pub fn new(model: impl Into<PathBuf>, solver: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            solver: solver.into(),
        }
    }
}

/// Configuration file entries in file order, duplicates included.
struct FileEntries(Vec<(String, SolverConfig)>);

struct FileEntriesVisitor;

impl<'de> Visitor<'de> for FileEntriesVisitor {
    type Value = FileEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of configuration names to {model, solver}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileEntries, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(FileEntries(entries))
    }
}

impl<'de> Deserialize<'de> for FileEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FileEntriesVisitor)
    }
}

/// Immutable lookup from configuration name to [`SolverConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTable {
    entries: BTreeMap<String, SolverConfig>,
}

impl ConfigTable {
    /// Build a table from name/config pairs.
    ///
    /// Rejects empty tables, empty or duplicate names, and the reserved mode
    /// names.
    pub fn new<I, S>(entries: I) -> Result<Self, StsError>
    where
        I: IntoIterator<Item = (S, SolverConfig)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, config) in entries {
            let name = name.into();
            if name.is_empty() {
                return Err(StsError::Config("configuration name is empty".into()));
            }
            if name == ALL_MODELS || name == ALL_MODELS_UP_TO_N {
                return Err(StsError::Config(format!(
                    "`{name}` is reserved for mode selection"
                )));
            }
            if config.solver.is_empty() {
                return Err(StsError::Config(format!("`{name}` has no solver")));
            }
            if map.insert(name.clone(), config).is_some() {
                return Err(StsError::Config(format!("duplicate configuration `{name}`")));
            }
        }
        if map.is_empty() {
            return Err(StsError::Config("no configurations defined".into()));
        }
        Ok(Self { entries: map })
    }

    /// The built-in configurations: the STS model under Gecode and Chuffed.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            ("gecode", SolverConfig::new(DEFAULT_MODEL_FILE, "gecode")),
            ("chuffed", SolverConfig::new(DEFAULT_MODEL_FILE, "chuffed")),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(name, config)| (name.to_string(), config))
                .collect(),
        }
    }

    /// Parse a table from a JSON object of `{"name": {"model": .., "solver": ..}}`.
    ///
    /// A name repeated in the object is rejected rather than overwritten.
    pub fn from_json(json: &str) -> Result<Self, StsError> {
        let FileEntries(entries) = serde_json::from_str(json)
            .map_err(|e| StsError::Config(format!("invalid configuration file: {e}")))?;
        Self::new(entries)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, StsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StsError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Resolve relative model paths against `dir`.
    #[must_use]
    pub fn with_model_dir(mut self, dir: &Path) -> Self {
        for config in self.entries.values_mut() {
            if config.model.is_relative() {
                config.model = dir.join(&config.model);
            }
        }
        self
    }

    /// Look up a configuration by name.
    pub fn get(&self, name: &str) -> Result<&SolverConfig, StsError> {
        self.entries
            .get(name)
            .ok_or_else(|| StsError::UnknownConfiguration(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All configuration names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConfigTable {
    fn default() -> Self {
        Self::builtin()
    }
}
