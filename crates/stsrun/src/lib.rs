//! stsrun library — application logic for the STS model runner.

pub mod app;
pub mod config;
pub mod errors;
