//! Export use case for writing comparison rows as CSV or JSONL.
//!
//! The exported dataset is the per-test-case row set, one line per row, in
//! the report's `(group, test_case)` order.

use crossbench_types::{ComparisonRow, ResultRecord};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RFC 4180 CSV with header row.
    Csv,
    /// JSON Lines (one JSON object per line).
    Jsonl,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "jsonl" => Some(ExportFormat::Jsonl),
            _ => None,
        }
    }
}

const CSV_HEADER: &str = "group,test_case,baseline_impl,best_candidate_impl,baseline_time_ns,candidate_time_ns,baseline_time_ms,candidate_time_ms,speedup_factor,performance_diff_percent,faster_language,winner,throughput_bytes,total_candidates_tested\n";

pub struct ExportUseCase;

impl ExportUseCase {
    pub fn export(rows: &[ComparisonRow], format: ExportFormat) -> anyhow::Result<String> {
        match format {
            ExportFormat::Csv => Ok(Self::rows_to_csv(rows)),
            ExportFormat::Jsonl => to_jsonl(rows),
        }
    }

    /// One JSON line per extracted record.
    pub fn export_records(records: &[ResultRecord]) -> anyhow::Result<String> {
        to_jsonl(records)
    }

    fn rows_to_csv(rows: &[ComparisonRow]) -> String {
        let mut output = String::from(CSV_HEADER);

        for row in rows {
            let fields = [
                csv_escape(&row.group),
                csv_escape(&row.test_case),
                csv_escape(&row.baseline_impl),
                csv_escape(&row.best_candidate_impl),
                format!("{:.6}", row.baseline_time_ns),
                format!("{:.6}", row.candidate_time_ns),
                format!("{:.6}", row.baseline_time_ms),
                format!("{:.6}", row.candidate_time_ms),
                format!("{:.6}", row.speedup_factor),
                format!("{:.6}", row.performance_diff_percent),
                csv_escape(&row.faster_language),
                row.winner.as_str().to_string(),
                row.throughput_bytes.to_string(),
                row.total_candidates_tested.to_string(),
            ];
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }
}

fn to_jsonl<T: serde::Serialize>(items: &[T]) -> anyhow::Result<String> {
    let mut output = String::new();
    for item in items {
        output.push_str(&serde_json::to_string(item)?);
        output.push('\n');
    }
    Ok(output)
}

/// Escape a string for CSV per RFC 4180.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
