//! Shared types for crossbench.
//!
//! Design goal: explicit schemas at the edges, plain values in the middle.
//! The raw Criterion artifact shapes live here so that every field the pipeline
//! relies on is named in exactly one place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COMPARISON_SCHEMA_V1: &str = "crossbench.comparison.v1";

/// Test case used when the harness recorded no parameter string.
pub const DEFAULT_TEST_CASE: &str = "default";

/// Criterion snapshot directory holding the artifacts of a result location.
pub const DEFAULT_SNAPSHOT: &str = "base";

pub const ESTIMATES_FILE: &str = "estimates.json";
pub const BENCHMARK_FILE: &str = "benchmark.json";

// ----------------------------
// Raw Criterion artifacts
// ----------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConfidenceInterval {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MeanEstimate {
    pub point_estimate: f64,
    pub confidence_interval: ConfidenceInterval,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PointEstimate {
    pub point_estimate: f64,
}

/// `estimates.json`. Only the fields crossbench reads are modelled; the rest
/// (slope, median_abs_dev, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CriterionEstimates {
    pub mean: MeanEstimate,
    pub median: PointEstimate,
    pub std_dev: PointEstimate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CriterionThroughput {
    #[serde(rename = "Bytes", default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// `benchmark.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CriterionBenchmark {
    pub group_id: String,
    pub function_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_str: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<CriterionThroughput>,
}

impl CriterionBenchmark {
    pub fn test_case(&self) -> &str {
        self.value_str.as_deref().unwrap_or(DEFAULT_TEST_CASE)
    }

    pub fn throughput_bytes(&self) -> u64 {
        self.throughput
            .as_ref()
            .and_then(|t| t.bytes)
            .unwrap_or(0)
    }
}

// ----------------------------
// Pipeline values
// ----------------------------

/// One completed benchmark run, as extracted from a result location.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ResultRecord {
    pub group_id: String,
    pub function_id: String,
    pub test_case: String,

    pub mean_time_ns: f64,
    pub median_time_ns: f64,
    pub std_dev: f64,

    pub mean_confidence_lower: f64,
    pub mean_confidence_upper: f64,

    /// Zero when the harness reported no byte throughput.
    pub throughput_bytes: u64,
}

/// Best candidate paired with the baseline for one `(group, test_case)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BestConfigEntry {
    pub group: String,
    pub test_case: String,
    pub baseline: ResultRecord,
    pub best_candidate: ResultRecord,

    /// Every candidate in the test case, keyed by `function_id` (includes the best one).
    pub all_candidates: BTreeMap<String, ResultRecord>,
}

#[derive(
    Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Candidate,
    Baseline,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Candidate => "candidate",
            Side::Baseline => "baseline",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparisonRow {
    pub group: String,
    pub test_case: String,

    pub baseline_impl: String,
    pub best_candidate_impl: String,

    pub baseline_time_ns: f64,
    pub candidate_time_ns: f64,
    pub baseline_time_ms: f64,
    pub candidate_time_ms: f64,

    /// baseline / candidate
    pub speedup_factor: f64,

    /// (baseline - candidate) / baseline * 100
    pub performance_diff_percent: f64,

    /// Label of the faster implementation.
    pub faster_language: String,
    pub winner: Side,

    /// Byte throughput of the best candidate.
    pub throughput_bytes: u64,
    pub total_candidates_tested: u32,
}

// ----------------------------
// Summary + report envelope
// ----------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Highlight {
    pub group: String,
    pub test_case: String,
    pub baseline_impl: String,
    pub candidate_impl: String,
    pub speedup_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LabelWins {
    pub label: String,
    pub side: Side,
    pub wins: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparisonSummary {
    pub total_comparisons: u32,
    pub candidate_wins: u32,
    pub baseline_wins: u32,
    pub candidate_win_pct: f64,
    pub baseline_win_pct: f64,

    /// Wins per `faster_language` label, most wins first.
    pub wins_by_label: Vec<LabelWins>,

    pub total_candidates_tested: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub biggest_candidate_win: Option<Highlight>,

    /// Only present when the baseline won at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biggest_baseline_win: Option<Highlight>,

    pub top_candidate_wins: Vec<Highlight>,
    pub top_baseline_wins: Vec<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportSettings {
    pub baseline_marker: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScanStats {
    /// Result locations found by the scanner.
    pub locations: u32,
    /// Locations that produced a record.
    pub records: u32,
    /// Locations dropped by the extractor.
    pub skipped: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub group: String,
    pub test_case: String,
    pub function_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AmbiguousBaseline {
    pub group: String,
    pub test_case: String,
    pub chosen: String,
    pub ignored: Vec<String>,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnpairedReason {
    NoBaseline,
    NoCandidates,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UnpairedCase {
    pub group: String,
    pub test_case: String,
    pub reason: UnpairedReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Diagnostics {
    pub duplicates: Vec<DuplicateRecord>,
    pub ambiguous_baselines: Vec<AmbiguousBaseline>,
    pub unpaired: Vec<UnpairedCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ComparisonReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub settings: ReportSettings,
    pub scan: ScanStats,
    pub diagnostics: Diagnostics,
    pub rows: Vec<ComparisonRow>,
    pub summary: ComparisonSummary,
}

// ----------------------------
// Optional config file schema
// ----------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub labels: LabelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Criterion output root, e.g. "target/criterion".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<String>,

    /// Case-insensitive substring identifying baseline implementations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_marker: Option<String>,

    /// Snapshot directory name inside each result location ("base" or "new").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LabelsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_info_defaults_missing_optionals() {
        let info: CriterionBenchmark =
            serde_json::from_str(r#"{"group_id":"sorting","function_id":"cpp_sort"}"#).unwrap();
        assert_eq!(info.test_case(), DEFAULT_TEST_CASE);
        assert_eq!(info.throughput_bytes(), 0);
    }

    #[test]
    fn benchmark_info_accepts_null_optionals() {
        let info: CriterionBenchmark = serde_json::from_str(
            r#"{"group_id":"g","function_id":"f","value_str":null,"throughput":null}"#,
        )
        .unwrap();
        assert_eq!(info.test_case(), "default");
        assert_eq!(info.throughput_bytes(), 0);
    }

    #[test]
    fn benchmark_info_reads_criterion_layout() {
        let json = r#"{
            "group_id": "word_count",
            "function_id": "rust_mmap",
            "value_str": "files=100",
            "throughput": {"Bytes": 1048576},
            "full_id": "word_count/rust_mmap/files=100",
            "directory_name": "word_count/rust_mmap/files=100",
            "title": "word_count/rust_mmap/files=100"
        }"#;
        let info: CriterionBenchmark = serde_json::from_str(json).unwrap();
        assert_eq!(info.test_case(), "files=100");
        assert_eq!(info.throughput_bytes(), 1_048_576);
    }

    #[test]
    fn elements_throughput_counts_as_zero_bytes() {
        let info: CriterionBenchmark = serde_json::from_str(
            r#"{"group_id":"g","function_id":"f","throughput":{"Elements":12}}"#,
        )
        .unwrap();
        assert_eq!(info.throughput_bytes(), 0);
    }

    #[test]
    fn estimates_missing_std_dev_is_rejected() {
        let json = r#"{
            "mean": {"point_estimate": 10.0, "confidence_interval": {"lower_bound": 9.0, "upper_bound": 11.0}},
            "median": {"point_estimate": 10.0}
        }"#;
        let err = serde_json::from_str::<CriterionEstimates>(json).unwrap_err();
        assert!(err.to_string().contains("std_dev"), "{err}");
    }

    #[test]
    fn side_serializes_snake_case() {
        let json = serde_json::to_string(&Side::Candidate).unwrap();
        assert_eq!(json, "\"candidate\"");
        assert_eq!(Side::Baseline.as_str(), "baseline");
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let err = toml::from_str::<ConfigFile>("[defaults]\nbaseline = \"cpp\"\n").unwrap_err();
        assert!(err.to_string().contains("baseline"), "{err}");
    }

    #[test]
    fn config_parses_all_sections() {
        let cfg: ConfigFile = toml::from_str(
            r#"
[defaults]
results_dir = "target/criterion"
baseline_marker = "cpp"
snapshot = "new"
max_depth = 4
group = "word_count"
top = 5

[labels]
baseline = "C++"
candidate = "Rust"
"#,
        )
        .unwrap();
        assert_eq!(cfg.defaults.baseline_marker.as_deref(), Some("cpp"));
        assert_eq!(cfg.defaults.max_depth, Some(4));
        assert_eq!(cfg.labels.candidate.as_deref(), Some("Rust"));
    }
}
