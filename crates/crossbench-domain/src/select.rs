use crate::{Aggregation, DomainError};
use crossbench_types::{
    AmbiguousBaseline, BestConfigEntry, ResultRecord, UnpairedCase, UnpairedReason,
};
use std::collections::BTreeMap;

/// Case-insensitive substring that marks an implementation as the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineMarker {
    raw: String,
    lowered: String,
}

impl BaselineMarker {
    pub fn new(marker: impl Into<String>) -> Result<Self, DomainError> {
        let raw = marker.into();
        if raw.is_empty() {
            return Err(DomainError::EmptyBaselineMarker);
        }
        let lowered = raw.to_lowercase();
        Ok(Self { raw, lowered })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, function_id: &str) -> bool {
        function_id.to_lowercase().contains(&self.lowered)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// One entry per test case that has a baseline and at least one candidate,
    /// ordered by `(group, test_case)`.
    pub entries: Vec<BestConfigEntry>,

    /// Test cases where more than one implementation matched the marker.
    pub ambiguous: Vec<AmbiguousBaseline>,

    /// Test cases dropped for lack of a baseline or of candidates.
    pub unpaired: Vec<UnpairedCase>,
}

/// Pair the fastest candidate with the baseline in every test case.
///
/// - The baseline is the lexicographically first `function_id` matching `marker`;
///   any further matches are left out of both slots and listed in `ambiguous`.
/// - The best candidate has the minimum `mean_time_ns`. Exact ties keep the
///   first candidate in `function_id` order.
/// - When `group` is set, other groups are ignored entirely.
pub fn select_best(agg: &Aggregation, marker: &BaselineMarker, group: Option<&str>) -> Selection {
    let mut selection = Selection::default();

    for (group_id, cases) in agg.groups() {
        if group.is_some_and(|g| g != group_id) {
            continue;
        }

        for (test_case, impls) in cases {
            let (baselines, candidates): (Vec<_>, Vec<_>) =
                impls.iter().partition(|(function_id, _)| marker.matches(function_id));

            let Some(((baseline_id, baseline), extra)) = baselines.split_first() else {
                selection
                    .unpaired
                    .push(unpaired(group_id, test_case, UnpairedReason::NoBaseline));
                continue;
            };

            if !extra.is_empty() {
                selection.ambiguous.push(AmbiguousBaseline {
                    group: group_id.clone(),
                    test_case: test_case.clone(),
                    chosen: (*baseline_id).clone(),
                    ignored: extra.iter().map(|(id, _)| (*id).clone()).collect(),
                });
            }

            let Some((_, best)) = candidates
                .iter()
                .min_by(|a, b| a.1.mean_time_ns.total_cmp(&b.1.mean_time_ns))
            else {
                selection
                    .unpaired
                    .push(unpaired(group_id, test_case, UnpairedReason::NoCandidates));
                continue;
            };

            let all_candidates: BTreeMap<String, ResultRecord> = candidates
                .iter()
                .map(|(id, record)| ((*id).clone(), (*record).clone()))
                .collect();

            selection.entries.push(BestConfigEntry {
                group: group_id.clone(),
                test_case: test_case.clone(),
                baseline: (*baseline).clone(),
                best_candidate: (*best).clone(),
                all_candidates,
            });
        }
    }

    selection
}

fn unpaired(group: &str, test_case: &str, reason: UnpairedReason) -> UnpairedCase {
    UnpairedCase {
        group: group.to_string(),
        test_case: test_case.to_string(),
        reason,
    }
}
