//! Std adapters for crossbench.
//!
//! In clean-arch terms: this is where we touch the world.

mod extract;
mod scan;

pub use extract::{ExtractError, extract_record, try_extract};
pub use scan::{
    DEFAULT_MAX_DEPTH, MIN_RESULT_DEPTH, ResultLocation, ResultLocations, ScanOptions,
    scan_results,
};

use crossbench_types::ResultRecord;
use std::path::PathBuf;
use tracing::debug;

/// What a record source produced in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub records: Vec<ResultRecord>,

    /// Result locations found, whether or not extraction succeeded.
    pub locations: usize,

    /// Locations whose artifacts could not be turned into a record.
    pub skipped: usize,
}

pub trait RecordSource {
    fn collect_records(&self) -> ScanOutcome;
}

/// A Criterion output directory on disk.
#[derive(Debug, Clone)]
pub struct CriterionTree {
    pub root: PathBuf,
    pub options: ScanOptions,
}

impl CriterionTree {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }
}

impl RecordSource for CriterionTree {
    fn collect_records(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for location in scan_results(&self.root, &self.options) {
            outcome.locations += 1;
            match try_extract(&location) {
                Some(record) => outcome.records.push(record),
                None => outcome.skipped += 1,
            }
        }

        debug!(
            root = %self.root.display(),
            locations = outcome.locations,
            records = outcome.records.len(),
            skipped = outcome.skipped,
            "scanned result tree"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_result(root: &Path, group: &str, function: &str, value: Option<&str>, mean: f64) {
        let mut dir = root.join(group).join(function);
        if let Some(v) = value {
            dir = dir.join(v);
        }
        let base = dir.join("base");
        fs::create_dir_all(&base).unwrap();

        let estimates = serde_json::json!({
            "mean": {
                "point_estimate": mean,
                "confidence_interval": {"lower_bound": mean * 0.9, "upper_bound": mean * 1.1}
            },
            "median": {"point_estimate": mean},
            "std_dev": {"point_estimate": mean * 0.01}
        });
        let info = serde_json::json!({
            "group_id": group,
            "function_id": function,
            "value_str": value,
        });
        fs::write(base.join("estimates.json"), estimates.to_string()).unwrap();
        fs::write(base.join("benchmark.json"), info.to_string()).unwrap();
    }

    #[test]
    fn collects_records_from_mixed_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_result(root, "hashing", "cpp_hash", None, 80.0);
        write_result(root, "hashing", "rust_hash", None, 60.0);
        write_result(root, "sorting", "cpp_sort", Some("n=1000"), 500.0);
        write_result(root, "sorting", "rust_sort_a", Some("n=1000"), 300.0);

        let outcome = CriterionTree::new(root, ScanOptions::default()).collect_records();
        assert_eq!(outcome.locations, 4);
        assert_eq!(outcome.skipped, 0);

        let ids: Vec<(&str, &str)> = outcome
            .records
            .iter()
            .map(|r| (r.function_id.as_str(), r.test_case.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("cpp_hash", "default"),
                ("rust_hash", "default"),
                ("cpp_sort", "n=1000"),
                ("rust_sort_a", "n=1000"),
            ]
        );
    }

    #[test]
    fn malformed_location_is_counted_as_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_result(root, "g", "cpp", None, 10.0);

        let broken = root.join("g/rust/base");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("estimates.json"), "[]").unwrap();
        fs::write(broken.join("benchmark.json"), "{}").unwrap();

        let outcome = CriterionTree::new(root, ScanOptions::default()).collect_records();
        assert_eq!(outcome.locations, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn empty_and_missing_roots_produce_nothing() {
        let tmp = TempDir::new().unwrap();

        let empty = CriterionTree::new(tmp.path(), ScanOptions::default()).collect_records();
        assert_eq!(empty, ScanOutcome::default());

        let missing =
            CriterionTree::new(tmp.path().join("nope"), ScanOptions::default()).collect_records();
        assert_eq!(missing, ScanOutcome::default());
    }
}
