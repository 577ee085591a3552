use crossbench_types::{BestConfigEntry, ComparisonRow, Side};

const NS_PER_MS: f64 = 1_000_000.0;

/// Derive the comparison metrics for one best-config entry.
///
/// Zero or non-finite timings are not special-cased: the resulting infinities
/// and NaNs are left in the row for the caller to see.
pub fn build_comparison(entry: &BestConfigEntry) -> ComparisonRow {
    let baseline_ns = entry.baseline.mean_time_ns;
    let candidate_ns = entry.best_candidate.mean_time_ns;

    let speedup_factor = baseline_ns / candidate_ns;
    let performance_diff_percent = (baseline_ns - candidate_ns) / baseline_ns * 100.0;

    let (winner, faster_language) = if speedup_factor > 1.0 {
        (Side::Candidate, &entry.best_candidate.function_id)
    } else {
        (Side::Baseline, &entry.baseline.function_id)
    };

    ComparisonRow {
        group: entry.group.clone(),
        test_case: entry.test_case.clone(),
        baseline_impl: entry.baseline.function_id.clone(),
        best_candidate_impl: entry.best_candidate.function_id.clone(),
        baseline_time_ns: baseline_ns,
        candidate_time_ns: candidate_ns,
        baseline_time_ms: baseline_ns / NS_PER_MS,
        candidate_time_ms: candidate_ns / NS_PER_MS,
        speedup_factor,
        performance_diff_percent,
        faster_language: faster_language.clone(),
        winner,
        throughput_bytes: entry.best_candidate.throughput_bytes,
        total_candidates_tested: u32::try_from(entry.all_candidates.len()).unwrap_or(u32::MAX),
    }
}

pub fn build_comparisons(entries: &[BestConfigEntry]) -> Vec<ComparisonRow> {
    entries.iter().map(build_comparison).collect()
}
