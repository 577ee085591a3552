//! Workspace-level integration tests: the full pipeline over real trees on disk,
//! wired the way the CLI wires it.

use crossbench_adapters::{CriterionTree, RecordSource, ScanOptions};
use crossbench_app::{
    CompareRequest, CompareUseCase, ExportFormat, ExportUseCase, SideLabels, render_markdown,
    render_text,
};
use crossbench_domain::{BaselineMarker, aggregate, build_comparisons, select_best};
use crossbench_types::{ComparisonReport, Side, ToolInfo};
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
            "confidence_interval": {"lower_bound": mean, "upper_bound": mean}
        },
        "median": {"point_estimate": mean},
        "std_dev": {"point_estimate": 0.0}
    });
    let info = serde_json::json!({
        "group_id": group,
        "function_id": function,
        "value_str": value,
        "throughput": {"Bytes": 1024},
    });
    fs::write(base.join("estimates.json"), estimates.to_string()).unwrap();
    fs::write(base.join("benchmark.json"), info.to_string()).unwrap();
}

fn tool() -> ToolInfo {
    ToolInfo {
        name: "crossbench".into(),
        version: "test".into(),
    }
}

fn request() -> CompareRequest {
    CompareRequest {
        baseline_marker: "cpp".into(),
        group: None,
        top: 3,
    }
}

fn run(root: &Path) -> ComparisonReport {
    CompareUseCase::new(CriterionTree::new(root, ScanOptions::default()), tool())
        .execute(&request())
        .unwrap()
}

#[test]
fn pipeline_over_mixed_depth_tree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for n in ["n=10", "n=100", "n=1000"] {
        write_result(root, "sorting", "cpp_sort", Some(n), 1000.0);
        write_result(root, "sorting", "rust_sort_a", Some(n), 800.0);
        write_result(root, "sorting", "rust_sort_b", Some(n), 1200.0);
    }
    write_result(root, "hashing", "cpp_hash", None, 50.0);
    write_result(root, "hashing", "rust_hash_simd", None, 25.0);

    let report = run(root);
    assert_eq!(report.scan.locations, 11);
    assert_eq!(report.rows.len(), 4);
    assert!(report.rows.iter().all(|r| r.winner == Side::Candidate));
    assert!(report.rows.iter().all(|r| r.throughput_bytes == 1024));

    let sorting: Vec<&str> = report
        .rows
        .iter()
        .filter(|r| r.group == "sorting")
        .map(|r| r.best_candidate_impl.as_str())
        .collect();
    assert_eq!(sorting, vec!["rust_sort_a"; 3]);

    assert_eq!(report.summary.total_candidates_tested, 7);
    let best = report.summary.biggest_candidate_win.as_ref().unwrap();
    assert_eq!(best.candidate_impl, "rust_hash_simd");
}

#[test]
fn pipeline_stages_agree_with_use_case() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_result(root, "g", "cpp", None, 30.0);
    write_result(root, "g", "rust_a", None, 20.0);
    write_result(root, "g", "rust_b", None, 10.0);

    let outcome = CriterionTree::new(root, ScanOptions::default()).collect_records();
    let marker = BaselineMarker::new("cpp").unwrap();
    let selection = select_best(&aggregate(outcome.records), &marker, None);
    let rows = build_comparisons(&selection.entries);

    assert_eq!(rows, run(root).rows);
    assert_eq!(rows[0].speedup_factor, 3.0);
}

#[test]
fn outputs_are_idempotent() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_result(root, "g", "cpp", Some("x"), 30.0);
    write_result(root, "g", "rust", Some("x"), 40.0);
    write_result(root, "h", "cpp", None, 30.0);
    write_result(root, "h", "rust", None, 10.0);

    let a = run(root);
    let b = run(root);
    let labels = SideLabels::default();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(render_text(&a, &labels), render_text(&b, &labels));
    assert_eq!(render_markdown(&a, &labels), render_markdown(&b, &labels));
    assert_eq!(
        ExportUseCase::export(&a.rows, ExportFormat::Csv).unwrap(),
        ExportUseCase::export(&b.rows, ExportFormat::Csv).unwrap()
    );
}

#[test]
fn zero_candidate_time_propagates_infinity() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_result(root, "g", "cpp", None, 30.0);
    write_result(root, "g", "rust", None, 0.0);

    let report = run(root);
    assert!(report.rows[0].speedup_factor.is_infinite());
    assert_eq!(report.rows[0].winner, Side::Candidate);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["rows"][0]["speedup_factor"].is_null());
}
