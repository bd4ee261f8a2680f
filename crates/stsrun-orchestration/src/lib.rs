//! # stsrun-orchestration
//!
//! Mode dispatch, sequential batch execution, and per-size persistence.

pub mod interfaces;
pub mod orchestrator;
pub mod selection;

pub use interfaces::{BundleSink, NullObserver, RunObserver};
pub use orchestrator::{Orchestrator, RunReport};
pub use selection::{Mode, RunPlan};
