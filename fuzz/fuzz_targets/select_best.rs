#![no_main]

use crossbench_app::{ExportFormat, ExportUseCase};
use crossbench_domain::{BaselineMarker, aggregate, build_comparisons, select_best, summarize};
use crossbench_types::ResultRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<ResultRecord>, String, u8)| {
    let (records, marker, top) = input;
    let Ok(marker) = BaselineMarker::new(marker) else {
        return;
    };

    let agg = aggregate(records);
    let selection = select_best(&agg, &marker, None);

    for entry in &selection.entries {
        assert!(marker.matches(&entry.baseline.function_id));
        assert!(!marker.matches(&entry.best_candidate.function_id));
        assert!(
            entry
                .all_candidates
                .values()
                .all(|c| entry.best_candidate.mean_time_ns.total_cmp(&c.mean_time_ns).is_le())
        );
    }

    let rows = build_comparisons(&selection.entries);
    let summary = summarize(&rows, usize::from(top));
    assert_eq!(summary.total_comparisons as usize, rows.len());
    assert!(summary.top_candidate_wins.len() <= usize::from(top));

    let _ = ExportUseCase::export(&rows, ExportFormat::Csv);
});
