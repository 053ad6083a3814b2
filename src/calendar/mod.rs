use anyhow::{Context, Result};
use icalendar::{Calendar, Component, Event, EventLike};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::process::ExamRecord;

pub const CALENDAR_NAME: &str = "UniCT Exam Extractor (DMI)";
pub const PRODUCT_ID: &str = "-//UniCT Exam Extractor (DMI)//";

/// Event title, e.g. "Esame: Algebra (Ordinario)".
pub fn event_summary(rec: &ExamRecord) -> String {
    format!("Esame: {} ({})", rec.subject, rec.record_type)
}

pub fn event_description(rec: &ExamRecord) -> String {
    format!("Appello di {} ({})", rec.subject, rec.record_type)
}

/// Build a calendar with one all-day event per record.
pub fn to_calendar(records: &[ExamRecord]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar
        .name(CALENDAR_NAME)
        .append_property(("PRODID", PRODUCT_ID));
    for rec in records {
        let event = Event::new()
            .summary(&event_summary(rec))
            .description(&event_description(rec))
            .all_day(rec.exam_date)
            .done();
        calendar.push(event);
    }
    calendar.done()
}

/// Write `records` as an `.ics` file and return the number of events.
pub fn export(records: &[ExamRecord], output: impl AsRef<Path>) -> Result<usize> {
    let output = output.as_ref();
    let ics = to_calendar(records).to_string();
    fs::write(output, ics).with_context(|| format!("writing {}", output.display()))?;
    info!(events = records.len(), path = %output.display(), "exported calendar");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordType;
    use chrono::NaiveDate;

    fn records() -> Vec<ExamRecord> {
        vec![
            ExamRecord::new(
                "Algebra",
                NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                RecordType::Regular,
            ),
            ExamRecord::new(
                "Basi di Dati",
                NaiveDate::from_ymd_opt(2025, 10, 30).unwrap(),
                RecordType::OutOfCourse,
            ),
        ]
    }

    #[test]
    fn test_event_text() {
        let recs = records();
        assert_eq!(event_summary(&recs[0]), "Esame: Algebra (Ordinario)");
        assert_eq!(
            event_description(&recs[1]),
            "Appello di Basi di Dati (Fuori Corso)"
        );
    }

    #[test]
    fn test_one_event_per_record() {
        let ics = to_calendar(&records()).to_string();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("PRODID:-//UniCT Exam Extractor (DMI)//"));
        assert!(ics.contains("SUMMARY:Esame: Algebra (Ordinario)"));
        assert!(ics.contains("DESCRIPTION:Appello di Basi di Dati (Fuori Corso)"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20260112"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20251030"));
    }

    #[test]
    fn test_export_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("esami.ics");
        assert_eq!(export(&records(), &path).unwrap(), 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("BEGIN:VCALENDAR"));
        assert!(written.contains("END:VCALENDAR"));
    }
}
