//! Workspace-level golden tests for stsrun.
