use crossbench_types::{DuplicateRecord, ResultRecord};
use std::collections::BTreeMap;

/// `test_case -> function_id -> record` for one group.
pub type TestCases = BTreeMap<String, BTreeMap<String, ResultRecord>>;

/// Records grouped by `group_id`, then `test_case`, then `function_id`.
///
/// Ordered maps keep every downstream iteration independent of the order the
/// scanner happened to yield records in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    groups: BTreeMap<String, TestCases>,
    duplicates: Vec<DuplicateRecord>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A second record for the same
    /// `(group, test_case, function_id)` replaces the first and is noted as a duplicate.
    pub fn insert(&mut self, record: ResultRecord) -> Option<ResultRecord> {
        let key = DuplicateRecord {
            group: record.group_id.clone(),
            test_case: record.test_case.clone(),
            function_id: record.function_id.clone(),
        };

        let previous = self
            .groups
            .entry(record.group_id.clone())
            .or_default()
            .entry(record.test_case.clone())
            .or_default()
            .insert(record.function_id.clone(), record);

        if previous.is_some() {
            self.duplicates.push(key);
        }
        previous
    }

    pub fn groups(&self) -> &BTreeMap<String, TestCases> {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&TestCases> {
        self.groups.get(group_id)
    }

    /// Overwritten keys, in insertion order.
    pub fn duplicates(&self) -> &[DuplicateRecord] {
        &self.duplicates
    }

    pub fn record_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|cases| cases.values())
            .map(|impls| impls.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<ResultRecord> for Aggregation {
    fn from_iter<I: IntoIterator<Item = ResultRecord>>(iter: I) -> Self {
        let mut agg = Aggregation::new();
        for record in iter {
            agg.insert(record);
        }
        agg
    }
}

/// Group every extracted record by `(group_id, test_case)` and `function_id`.
pub fn aggregate<I>(records: I) -> Aggregation
where
    I: IntoIterator<Item = ResultRecord>,
{
    records.into_iter().collect()
}
