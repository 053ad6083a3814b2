use chrono::NaiveDate;
use std::fmt;

/// Distinguishes standard-session sittings from out-of-course ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    Regular,
    OutOfCourse,
}

impl RecordType {
    /// Label stored in the database and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Regular => "Ordinario",
            RecordType::OutOfCourse => "Fuori Corso",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ordinario" | "regular" => Some(RecordType::Regular),
            "fuori corso" | "out-of-course" => Some(RecordType::OutOfCourse),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One exam sitting. Two records with the same subject, date and type are
/// the same appointment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExamRecord {
    pub subject: String,
    pub exam_date: NaiveDate,
    pub record_type: RecordType,
}

impl ExamRecord {
    pub fn new(subject: impl Into<String>, exam_date: NaiveDate, record_type: RecordType) -> Self {
        Self {
            subject: subject.into(),
            exam_date,
            record_type,
        }
    }

    /// `YYYY-MM-DD`, the form used for storage and ordering.
    pub fn iso_date(&self) -> String {
        self.exam_date.format("%Y-%m-%d").to_string()
    }
}
