//! Effective settings: CLI flag, else config file, else built-in default.

use crate::CompareRequest;
use crossbench_adapters::{DEFAULT_MAX_DEPTH, MIN_RESULT_DEPTH, ScanOptions};
use crossbench_types::{ConfigFile, DEFAULT_SNAPSHOT, Side};
use std::path::PathBuf;

pub const DEFAULT_RESULTS_DIR: &str = "target/criterion";
pub const DEFAULT_BASELINE_MARKER: &str = "cpp";
pub const DEFAULT_TOP: usize = 3;
pub const DEFAULT_BASELINE_LABEL: &str = "baseline";
pub const DEFAULT_CANDIDATE_LABEL: &str = "candidate";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("baseline marker must not be empty")]
    EmptyBaselineMarker,

    #[error("snapshot directory name must not be empty")]
    EmptySnapshot,

    #[error(
        "max depth {max_depth} is too shallow: results live at least {} levels below the root",
        MIN_RESULT_DEPTH
    )]
    MaxDepthTooShallow { max_depth: usize },
}

/// Display names for the two sides of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideLabels {
    pub baseline: String,
    pub candidate: String,
}

impl SideLabels {
    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Baseline => &self.baseline,
            Side::Candidate => &self.candidate,
        }
    }
}

impl Default for SideLabels {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE_LABEL.to_string(),
            candidate: DEFAULT_CANDIDATE_LABEL.to_string(),
        }
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub results_dir: Option<PathBuf>,
    pub baseline_marker: Option<String>,
    pub snapshot: Option<String>,
    pub max_depth: Option<usize>,
    pub group: Option<String>,
    pub top: Option<usize>,
    pub baseline_label: Option<String>,
    pub candidate_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub results_dir: PathBuf,
    pub baseline_marker: String,
    pub snapshot: String,
    pub max_depth: usize,
    pub group: Option<String>,
    pub top: usize,
    pub labels: SideLabels,
}

impl Settings {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            snapshot: self.snapshot.clone(),
            max_depth: self.max_depth,
        }
    }

    pub fn compare_request(&self) -> CompareRequest {
        CompareRequest {
            baseline_marker: self.baseline_marker.clone(),
            group: self.group.clone(),
            top: self.top,
        }
    }
}

pub fn resolve_settings(
    file: &ConfigFile,
    cli: SettingsOverrides,
) -> Result<Settings, SettingsError> {
    let defaults = &file.defaults;
    let labels = &file.labels;

    let results_dir = cli
        .results_dir
        .or_else(|| defaults.results_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));

    let baseline_marker = cli
        .baseline_marker
        .or_else(|| defaults.baseline_marker.clone())
        .unwrap_or_else(|| DEFAULT_BASELINE_MARKER.to_string());
    if baseline_marker.is_empty() {
        return Err(SettingsError::EmptyBaselineMarker);
    }

    let snapshot = cli
        .snapshot
        .or_else(|| defaults.snapshot.clone())
        .unwrap_or_else(|| DEFAULT_SNAPSHOT.to_string());
    if snapshot.is_empty() {
        return Err(SettingsError::EmptySnapshot);
    }

    let max_depth = cli
        .max_depth
        .or(defaults.max_depth)
        .unwrap_or(DEFAULT_MAX_DEPTH);
    if max_depth < MIN_RESULT_DEPTH {
        return Err(SettingsError::MaxDepthTooShallow { max_depth });
    }

    Ok(Settings {
        results_dir,
        baseline_marker,
        snapshot,
        max_depth,
        group: cli.group.or_else(|| defaults.group.clone()),
        top: cli.top.or(defaults.top).unwrap_or(DEFAULT_TOP),
        labels: SideLabels {
            baseline: cli
                .baseline_label
                .or_else(|| labels.baseline.clone())
                .unwrap_or_else(|| DEFAULT_BASELINE_LABEL.to_string()),
            candidate: cli
                .candidate_label
                .or_else(|| labels.candidate.clone())
                .unwrap_or_else(|| DEFAULT_CANDIDATE_LABEL.to_string()),
        },
    })
}
