//! Text and markdown renderings of a [`ComparisonReport`].
//!
//! Renderers only format what the report already holds.

use crate::SideLabels;
use crossbench_types::{ComparisonReport, ComparisonRow, Highlight, Side};

pub const NO_DATA: &str = "No comparison data found.";

const RULE_WIDE: usize = 70;
const RULE_SECTION: usize = 60;
const RULE_GROUP: usize = 50;

/// Plain-text console summary.
pub fn render_text(report: &ComparisonReport, labels: &SideLabels) -> String {
    let mut out = String::new();
    let cand = &labels.candidate;
    let base = &labels.baseline;

    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDE)));
    out.push_str(&format!(
        "BEST {} vs {} BENCHMARK COMPARISON SUMMARY\n",
        cand.to_uppercase(),
        base.to_uppercase()
    ));
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDE)));

    if report.rows.is_empty() {
        out.push_str(&format!("{NO_DATA}\n"));
        return out;
    }

    let s = &report.summary;
    out.push('\n');
    out.push_str(&format!("Total Test Cases: {}\n", s.total_comparisons));
    out.push_str(&format!(
        "Best {cand} Config Wins: {} ({:.1}%)\n",
        s.candidate_wins, s.candidate_win_pct
    ));
    out.push_str(&format!(
        "{base} Wins: {} ({:.1}%)\n",
        s.baseline_wins, s.baseline_win_pct
    ));
    out.push_str(&format!(
        "Total {cand} Configurations Tested: {}\n",
        s.total_candidates_tested
    ));
    out.push_str(&format!("Showing only best performing {cand} config per test case\n"));

    if !s.wins_by_label.is_empty() {
        out.push('\n');
        out.push_str("Wins by Implementation:\n");
        for w in &s.wins_by_label {
            out.push_str(&format!(
                "  {} [{}]: {} ({:.1}%)\n",
                w.label,
                labels.get(w.side),
                w.wins,
                w.pct
            ));
        }
    }

    if let Some(h) = &s.biggest_candidate_win {
        out.push('\n');
        out.push_str(&format!("Biggest {cand} Victory:\n"));
        out.push_str(&format!("  {} vs {}\n", h.candidate_impl, h.baseline_impl));
        out.push_str(&format!("  Speedup: {:.2}x faster\n", h.speedup_factor));
        out.push_str(&format!("  Test: {}/{}\n", h.group, h.test_case));
    }

    if let Some(h) = &s.biggest_baseline_win {
        out.push('\n');
        out.push_str(&format!("Biggest {base} Victory:\n"));
        out.push_str(&format!("  {} vs {}\n", h.baseline_impl, h.candidate_impl));
        out.push_str(&format!("  Speedup: {:.2}x faster\n", 1.0 / h.speedup_factor));
        out.push_str(&format!("  Test: {}/{}\n", h.group, h.test_case));
    }

    out.push('\n');
    out.push_str("Detailed Results by Group:\n");
    out.push_str(&format!("{}\n", "-".repeat(RULE_GROUP)));

    let mut current_group: Option<&str> = None;
    for row in &report.rows {
        if current_group != Some(row.group.as_str()) {
            out.push('\n');
            out.push_str(&format!("{}:\n", row.group.to_uppercase()));
            current_group = Some(row.group.as_str());
        }
        write_row(&mut out, row, labels);
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "=".repeat(RULE_SECTION)));
    out.push_str(&format!("TOP {} CONFIGURATIONS:\n", cand.to_uppercase()));
    for h in &s.top_candidate_wins {
        out.push_str(&format!(
            "  {}: {:.2}x faster than {}\n",
            h.candidate_impl, h.speedup_factor, h.baseline_impl
        ));
    }

    if !s.top_baseline_wins.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{} STILL WINS AGAINST BEST {}:\n",
            base.to_uppercase(),
            cand.to_uppercase()
        ));
        for h in &s.top_baseline_wins {
            out.push_str(&format!(
                "  {}: {:.2}x faster than best {cand} ({})\n",
                h.baseline_impl,
                1.0 / h.speedup_factor,
                h.candidate_impl
            ));
        }
    }

    out
}

fn write_row(out: &mut String, row: &ComparisonRow, labels: &SideLabels) {
    out.push_str(&format!("  {}:\n", row.test_case));
    out.push_str(&format!(
        "    Best {cand} ({}): {:.2}ms (best of {} {cand} configs)\n",
        row.best_candidate_impl,
        row.candidate_time_ms,
        row.total_candidates_tested,
        cand = labels.candidate
    ));
    out.push_str(&format!(
        "    {} ({}): {:.2}ms\n",
        labels.baseline, row.baseline_impl, row.baseline_time_ms
    ));
    out.push_str(&format!(
        "    Winner: {} ({:.1}% faster)\n",
        labels.get(row.winner),
        row.performance_diff_percent.abs()
    ));
}

/// Markdown summary, suitable for a PR comment or job summary.
pub fn render_markdown(report: &ComparisonReport, labels: &SideLabels) -> String {
    let mut out = String::new();
    let cand = &labels.candidate;
    let base = &labels.baseline;

    out.push_str(&format!("## crossbench: best {cand} vs {base}\n"));
    out.push('\n');

    if report.rows.is_empty() {
        out.push_str(&format!("{NO_DATA}\n"));
        return out;
    }

    let s = &report.summary;
    out.push_str(&format!(
        "**Test cases:** {} | **{cand} wins:** {} ({:.1}%) | **{base} wins:** {} ({:.1}%) | **{cand} configurations tested:** {}\n",
        s.total_comparisons,
        s.candidate_wins,
        s.candidate_win_pct,
        s.baseline_wins,
        s.baseline_win_pct,
        s.total_candidates_tested
    ));
    out.push('\n');

    out.push_str(&format!(
        "| group | test case | {base} | best {cand} | {base} (ms) | {cand} (ms) | speedup | diff | winner |\n"
    ));
    out.push_str("|---|---|---|---|---:|---:|---:|---:|---|\n");
    for row in &report.rows {
        out.push_str(&format!(
            "| {} | `{}` | `{}` | `{}` | {:.3} | {:.3} | {:.2}x | {} | {} |\n",
            row.group,
            row.test_case,
            row.baseline_impl,
            row.best_candidate_impl,
            row.baseline_time_ms,
            row.candidate_time_ms,
            row.speedup_factor,
            format_pct(row.performance_diff_percent),
            winner_cell(row.winner, labels),
        ));
    }

    let highlights = [
        (format!("Biggest {cand} victory"), &s.biggest_candidate_win, Side::Candidate),
        (format!("Biggest {base} victory"), &s.biggest_baseline_win, Side::Baseline),
    ];
    let mut wrote_heading = false;
    for (title, highlight, side) in highlights {
        let Some(h) = highlight else { continue };
        if !wrote_heading {
            out.push('\n');
            out.push_str("**Highlights:**\n");
            wrote_heading = true;
        }
        out.push_str(&format!("- {title}: {}\n", describe(h, side)));
    }

    let d = &report.diagnostics;
    if !d.unpaired.is_empty() || !d.ambiguous_baselines.is_empty() || !d.duplicates.is_empty() {
        out.push('\n');
        out.push_str("**Notes:**\n");
        if !d.unpaired.is_empty() {
            out.push_str(&format!(
                "- {} test case(s) without a {base}/{cand} pair\n",
                d.unpaired.len()
            ));
        }
        for amb in &d.ambiguous_baselines {
            out.push_str(&format!(
                "- `{}/{}`: {base} `{}` chosen over {}\n",
                amb.group,
                amb.test_case,
                amb.chosen,
                amb.ignored
                    .iter()
                    .map(|i| format!("`{i}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !d.duplicates.is_empty() {
            out.push_str(&format!("- {} duplicate record(s) replaced\n", d.duplicates.len()));
        }
    }

    out
}

fn describe(h: &Highlight, side: Side) -> String {
    match side {
        Side::Candidate => format!(
            "`{}` is {:.2}x faster than `{}` on `{}/{}`",
            h.candidate_impl, h.speedup_factor, h.baseline_impl, h.group, h.test_case
        ),
        Side::Baseline => format!(
            "`{}` is {:.2}x faster than `{}` on `{}/{}`",
            h.baseline_impl,
            1.0 / h.speedup_factor,
            h.candidate_impl,
            h.group,
            h.test_case
        ),
    }
}

fn winner_cell(side: Side, labels: &SideLabels) -> String {
    match side {
        Side::Candidate => format!("✅ {}", labels.candidate),
        Side::Baseline => format!("❌ {}", labels.baseline),
    }
}

fn format_pct(pct: f64) -> String {
    let sign = if pct > 0.0 { "+" } else { "" };
    format!("{sign}{pct:.1}%")
}
