//! Application layer for crossbench.
//!
//! The app layer coordinates adapters and domain logic.
//! It does not parse CLI flags and it does not do filesystem I/O.

mod export;
mod render;
mod settings;

pub use export::{ExportFormat, ExportUseCase};
pub use render::{render_markdown, render_text};
pub use settings::{
    DEFAULT_BASELINE_LABEL, DEFAULT_BASELINE_MARKER, DEFAULT_CANDIDATE_LABEL,
    DEFAULT_RESULTS_DIR, DEFAULT_TOP, Settings, SettingsError, SettingsOverrides, SideLabels,
    resolve_settings,
};

use anyhow::Context;
use crossbench_adapters::{RecordSource, ScanOutcome};
use crossbench_domain::{BaselineMarker, aggregate, build_comparisons, select_best, summarize};
use crossbench_types::{
    COMPARISON_SCHEMA_V1, ComparisonReport, Diagnostics, ReportSettings, ScanStats, ToolInfo,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    pub baseline_marker: String,

    /// Restrict the comparison to one `group_id`.
    pub group: Option<String>,

    /// Length of the two ranking lists in the summary.
    pub top: usize,
}

pub struct CompareUseCase<S: RecordSource> {
    source: S,
    tool: ToolInfo,
}

impl<S: RecordSource> CompareUseCase<S> {
    pub fn new(source: S, tool: ToolInfo) -> Self {
        Self { source, tool }
    }

    /// Extracted records only, without aggregation.
    pub fn records(&self) -> ScanOutcome {
        self.source.collect_records()
    }

    pub fn execute(&self, req: &CompareRequest) -> anyhow::Result<ComparisonReport> {
        let marker = BaselineMarker::new(req.baseline_marker.as_str())
            .context("invalid baseline marker")?;

        let outcome = self.source.collect_records();
        let scan = ScanStats {
            locations: to_u32(outcome.locations),
            records: to_u32(outcome.records.len()),
            skipped: to_u32(outcome.skipped),
        };

        let agg = aggregate(outcome.records);
        for dup in agg.duplicates() {
            warn!(
                group = %dup.group,
                test_case = %dup.test_case,
                function_id = %dup.function_id,
                "duplicate result record; keeping the last one read"
            );
        }

        if let Some(group) = req.group.as_deref()
            && agg.group(group).is_none()
        {
            info!(group, "no results for the requested group");
        }

        let selection = select_best(&agg, &marker, req.group.as_deref());
        for amb in &selection.ambiguous {
            warn!(
                group = %amb.group,
                test_case = %amb.test_case,
                chosen = %amb.chosen,
                ignored = ?amb.ignored,
                "several implementations match the baseline marker"
            );
        }
        for case in &selection.unpaired {
            debug!(
                group = %case.group,
                test_case = %case.test_case,
                reason = ?case.reason,
                "test case has no comparison"
            );
        }

        let rows = build_comparisons(&selection.entries);
        for row in rows.iter().filter(|r| !r.speedup_factor.is_finite()) {
            warn!(
                group = %row.group,
                test_case = %row.test_case,
                baseline_ns = row.baseline_time_ns,
                candidate_ns = row.candidate_time_ns,
                "speedup is not finite"
            );
        }

        let summary = summarize(&rows, req.top);

        Ok(ComparisonReport {
            schema: COMPARISON_SCHEMA_V1.to_string(),
            tool: self.tool.clone(),
            settings: ReportSettings {
                baseline_marker: marker.as_str().to_string(),
                group: req.group.clone(),
            },
            scan,
            diagnostics: Diagnostics {
                duplicates: agg.duplicates().to_vec(),
                ambiguous_baselines: selection.ambiguous,
                unpaired: selection.unpaired,
            },
            rows,
            summary,
        })
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
