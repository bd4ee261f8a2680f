//! # stsrun-cli
//!
//! Result file persistence, run progress display, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod ui;

pub use output::JsonFileSink;
pub use presenter::CLIRunPresenter;
