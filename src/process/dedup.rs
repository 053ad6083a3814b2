use std::collections::BTreeSet;

use super::record::{ExamRecord, RecordType};
use chrono::NaiveDate;

/// Canonical ordering key: date first, then subject, then type label.
/// `NaiveDate` orders exactly like its ISO-8601 rendering. The trailing
/// `RecordType` is determined by the label and never changes the order.
type DedupKey = (NaiveDate, String, &'static str, RecordType);

fn key_of(rec: ExamRecord) -> DedupKey {
    let label = rec.record_type.as_str();
    (rec.exam_date, rec.subject, label, rec.record_type)
}

/// Collapse repeated appointments and return them in canonical
/// (date, subject, type) order.
pub fn dedup<I>(records: I) -> Vec<ExamRecord>
where
    I: IntoIterator<Item = ExamRecord>,
{
    let unique: BTreeSet<DedupKey> = records.into_iter().map(key_of).collect();
    unique
        .into_iter()
        .map(|(date, subject, _, record_type)| ExamRecord::new(subject, date, record_type))
        .collect()
}
