//! Crossbench workspace-level test utilities.
//!
//! This crate exists solely to support workspace-level integration tests,
//! particularly the BDD/cucumber tests in `tests/cucumber.rs`.
//!
//! The crossbench functionality itself is in the workspace member crates:
//! - `crossbench-types`: Criterion artifact schemas, pipeline values, report envelope
//! - `crossbench-domain`: Aggregation, best-candidate selection, comparison math
//! - `crossbench-adapters`: Result-tree scanning and artifact extraction
//! - `crossbench-app`: Use case, settings, renderers, export
//! - `crossbench-cli`: the `crossbench` binary
