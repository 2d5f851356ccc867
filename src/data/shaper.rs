use tracing::trace;

use crate::core::CategoryRecord;

use super::loader::SurveyData;

/// Turns a raw data key into a display category (`no_benefit` → `no benefit`).
#[must_use]
pub fn normalize_category(key: &str) -> String {
    key.replace('_', " ")
}

/// Converts survey data into records, one per key, in input order.
#[must_use]
pub fn shape_records(data: &SurveyData) -> Vec<CategoryRecord> {
    let records: Vec<CategoryRecord> = data
        .iter()
        .map(|(key, &value)| CategoryRecord::new(normalize_category(key), value))
        .collect();
    trace!(count = records.len(), "shaped category records");
    records
}
