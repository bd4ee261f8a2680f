//! Mode selection and run planning.

use stsrun_core::constants::{ALL_MODELS, ALL_MODELS_UP_TO_N};
use stsrun_core::{ConfigTable, ProblemSize, StsError};

/// What the caller asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One named configuration at size n.
    Single(String),
    /// Every configuration at size n.
    AllModels,
    /// Every configuration at every even size from 2 through n.
    AllModelsUpToN,
}

impl Mode {
    /// Parse a mode choice against the configuration table.
    pub fn parse(choice: &str, table: &ConfigTable) -> Result<Self, StsError> {
        match choice {
            ALL_MODELS => Ok(Self::AllModels),
            ALL_MODELS_UP_TO_N => Ok(Self::AllModelsUpToN),
            name if table.contains(name) => Ok(Self::Single(name.to_string())),
            name => Err(StsError::UnknownConfiguration(name.to_string())),
        }
    }
}

/// One problem size and the configurations to run at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBatch {
    pub n: ProblemSize,
    pub configs: Vec<String>,
}

/// Ordered batches produced by mode dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    batches: Vec<PlannedBatch>,
}

impl RunPlan {
    /// Build the plan for `mode` at raw size `n`.
    pub fn new(mode: &Mode, n: u32, table: &ConfigTable) -> Result<Self, StsError> {
        let n = ProblemSize::new(n)?;
        let all: Vec<String> = table.names().map(str::to_string).collect();
        let batches = match mode {
            Mode::Single(name) => {
                table.get(name)?;
                vec![PlannedBatch {
                    n,
                    configs: vec![name.clone()],
                }]
            }
            Mode::AllModels => vec![PlannedBatch { n, configs: all }],
            Mode::AllModelsUpToN => n
                .up_to()
                .map(|size| PlannedBatch {
                    n: size,
                    configs: all.clone(),
                })
                .collect(),
        };
        Ok(Self { batches })
    }

    /// Validate `n`, then parse `choice` and plan it.
    pub fn from_choice(choice: &str, n: u32, table: &ConfigTable) -> Result<Self, StsError> {
        ProblemSize::new(n)?;
        let mode = Mode::parse(choice, table)?;
        Self::new(&mode, n, table)
    }

    #[must_use]
    pub fn batches(&self) -> &[PlannedBatch] {
        &self.batches
    }

    /// Total number of solver invocations.
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.batches.iter().map(|b| b.configs.len()).sum()
    }
}
