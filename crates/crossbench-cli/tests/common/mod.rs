//! Shared fixture helpers: Criterion-shaped result trees on disk.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Write one result location with both artifacts under `base/`.
pub fn write_result(root: &Path, group: &str, function: &str, value: Option<&str>, mean_ns: f64) {
    let mut dir = root.join(group).join(function);
    if let Some(v) = value {
        dir = dir.join(v);
    }
    let base = dir.join("base");
    fs::create_dir_all(&base).expect("create result dir");

    let estimates = serde_json::json!({
        "mean": {
            "confidence_interval": {
                "confidence_level": 0.95,
                "lower_bound": mean_ns * 0.95,
                "upper_bound": mean_ns * 1.05
            },
            "point_estimate": mean_ns,
            "standard_error": mean_ns * 0.01
        },
        "median": {
            "confidence_interval": {
                "confidence_level": 0.95,
                "lower_bound": mean_ns * 0.95,
                "upper_bound": mean_ns * 1.05
            },
            "point_estimate": mean_ns,
            "standard_error": mean_ns * 0.01
        },
        "std_dev": {
            "confidence_interval": {
                "confidence_level": 0.95,
                "lower_bound": mean_ns * 0.01,
                "upper_bound": mean_ns * 0.03
            },
            "point_estimate": mean_ns * 0.02,
            "standard_error": mean_ns * 0.001
        }
    });
    let benchmark = serde_json::json!({
        "group_id": group,
        "function_id": function,
        "value_str": value,
        "throughput": null,
        "full_id": format!("{group}/{function}"),
        "directory_name": format!("{group}/{function}"),
        "title": format!("{group}/{function}")
    });

    fs::write(base.join("estimates.json"), estimates.to_string()).expect("write estimates");
    fs::write(base.join("benchmark.json"), benchmark.to_string()).expect("write benchmark");
}

/// sorting/n=1000: candidates win 2x. hashing: baseline wins 4x.
/// parsing: candidate only, so it never pairs.
pub fn sample_tree(root: &Path) {
    write_result(root, "sorting", "cpp_sort", Some("n=1000"), 500_000.0);
    write_result(root, "sorting", "rust_sort_a", Some("n=1000"), 300_000.0);
    write_result(root, "sorting", "rust_sort_b", Some("n=1000"), 250_000.0);
    write_result(root, "hashing", "cpp_hash", None, 100.0);
    write_result(root, "hashing", "rust_hash", None, 400.0);
    write_result(root, "parsing", "rust_parse", None, 10.0);
}
