use std::collections::HashSet;

use super::records::{FilterRecord, LineageRecord};

/// Corpus-wide accumulator that keeps the first occurrence of every
/// distinct record and drops the rest.
///
/// Lineage identity is the exact `(file, schema, table, field)` tuple.
/// Filter identity is order-independent over the record's field values,
/// so logically identical rows built through different code paths still
/// collapse.
#[derive(Debug, Default)]
pub struct Aggregator {
    lineage: Vec<LineageRecord>,
    filters: Vec<FilterRecord>,
    seen_lineage: HashSet<LineageRecord>,
    seen_filters: HashSet<Vec<(&'static str, String)>>,
    duplicates_dropped: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lineage(&mut self, record: LineageRecord) {
        if self.seen_lineage.insert(record.clone()) {
            self.lineage.push(record);
        } else {
            self.duplicates_dropped += 1;
        }
    }

    pub fn add_filter(&mut self, record: FilterRecord) {
        if self.seen_filters.insert(record.dedup_key()) {
            self.filters.push(record);
        } else {
            self.duplicates_dropped += 1;
        }
    }

    pub fn extend_lineage(&mut self, records: impl IntoIterator<Item = LineageRecord>) {
        for record in records {
            self.add_lineage(record);
        }
    }

    pub fn extend_filters(&mut self, records: impl IntoIterator<Item = FilterRecord>) {
        for record in records {
            self.add_filter(record);
        }
    }

    pub fn lineage(&self) -> &[LineageRecord] {
        &self.lineage
    }

    pub fn filters(&self) -> &[FilterRecord] {
        &self.filters
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    pub fn into_records(self) -> (Vec<LineageRecord>, Vec<FilterRecord>) {
        (self.lineage, self.filters)
    }
}
