use crossbench_types::{ComparisonRow, ComparisonSummary, Highlight, LabelWins, Side};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Compute the aggregate figures a report shows on top of the per-row table.
///
/// `top` bounds the two ranking lists. Rows with a NaN speedup are counted in
/// the win tallies (as baseline wins, like any row whose speedup is not > 1) but
/// never appear in highlights or rankings.
pub fn summarize(rows: &[ComparisonRow], top: usize) -> ComparisonSummary {
    let total = rows.len();
    let candidate_wins = rows.iter().filter(|r| r.winner == Side::Candidate).count();
    let baseline_wins = total - candidate_wins;

    let mut by_label: BTreeMap<(&str, Side), usize> = BTreeMap::new();
    for row in rows {
        *by_label
            .entry((row.faster_language.as_str(), row.winner))
            .or_default() += 1;
    }
    let mut wins_by_label: Vec<LabelWins> = by_label
        .into_iter()
        .map(|((label, side), wins)| LabelWins {
            label: label.to_string(),
            side,
            wins: to_u32(wins),
            pct: percent(wins, total),
        })
        .collect();
    wins_by_label.sort_by(|a, b| b.wins.cmp(&a.wins));

    let ranked: Vec<&ComparisonRow> = rows
        .iter()
        .filter(|r| !r.speedup_factor.is_nan())
        .collect();

    let biggest_candidate_win = ranked
        .iter()
        .copied()
        .min_by(|a, b| descending(a, b))
        .map(highlight);

    let biggest_baseline_win = ranked
        .iter()
        .copied()
        .min_by(|a, b| a.speedup_factor.total_cmp(&b.speedup_factor))
        .filter(|r| r.speedup_factor < 1.0)
        .map(highlight);

    let mut candidate_ranked: Vec<&ComparisonRow> = ranked
        .iter()
        .copied()
        .filter(|r| r.winner == Side::Candidate)
        .collect();
    candidate_ranked.sort_by(|a, b| descending(a, b));

    let mut baseline_ranked: Vec<&ComparisonRow> = ranked
        .iter()
        .copied()
        .filter(|r| r.winner == Side::Baseline)
        .collect();
    baseline_ranked.sort_by(|a, b| a.speedup_factor.total_cmp(&b.speedup_factor));

    ComparisonSummary {
        total_comparisons: to_u32(total),
        candidate_wins: to_u32(candidate_wins),
        baseline_wins: to_u32(baseline_wins),
        candidate_win_pct: percent(candidate_wins, total),
        baseline_win_pct: percent(baseline_wins, total),
        wins_by_label,
        total_candidates_tested: rows
            .iter()
            .map(|r| u64::from(r.total_candidates_tested))
            .sum(),
        biggest_candidate_win,
        biggest_baseline_win,
        top_candidate_wins: candidate_ranked.into_iter().take(top).map(highlight).collect(),
        top_baseline_wins: baseline_ranked.into_iter().take(top).map(highlight).collect(),
    }
}

fn descending(a: &ComparisonRow, b: &ComparisonRow) -> Ordering {
    b.speedup_factor.total_cmp(&a.speedup_factor)
}

fn highlight(row: &ComparisonRow) -> Highlight {
    Highlight {
        group: row.group.clone(),
        test_case: row.test_case.clone(),
        baseline_impl: row.baseline_impl.clone(),
        candidate_impl: row.best_candidate_impl.clone(),
        speedup_factor: row.speedup_factor,
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
