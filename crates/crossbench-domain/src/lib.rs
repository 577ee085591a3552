//! Domain logic for crossbench.
//!
//! This crate is intentionally I/O-free: it groups records, picks winners and
//! does the speedup math. Scanning the result tree lives in `crossbench-adapters`.

mod aggregate;
mod compare;
mod select;
mod summary;

pub use aggregate::{Aggregation, TestCases, aggregate};
pub use compare::{build_comparison, build_comparisons};
pub use select::{BaselineMarker, Selection, select_best};
pub use summary::summarize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("baseline marker must not be empty")]
    EmptyBaselineMarker,
}
