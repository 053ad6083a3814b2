use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::date_parser::{month_from_name, resolve_day_list, resolve_full_date};
use super::raw_table::RawTable;
use super::record::{ExamRecord, RecordType};
use super::utils::{cell_text, contains_upper};

/// Column index → (month, year) for the month columns of a regular table.
pub type MonthColumnMap = BTreeMap<usize, (u32, i32)>;

static MONTH_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+)\s*(\d{4})").expect("month header regex"));

/// Subject-cell fragments marking room listings and year banners in
/// regular tables.
const REGULAR_NOISE: [&str; 3] = ["AULA", "PRIMO ANNO", "SECONDO ANNO"];

/// Subject-cell fragments marking grouping banners in out-of-course tables.
/// "ANNO" also hits any subject containing that substring.
const OUT_OF_COURSE_NOISE: [&str; 2] = ["ANNO", "CORSO DI LAUREA"];

/// The two table schemas published by the department.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Columns are months, cells list day numbers.
    Regular,
    /// Each cell holds a full "day month year" sitting.
    OutOfCourse,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Regular, Layout::OutOfCourse];

    /// Emit candidate records for an already classified table.
    pub fn extract(&self, table: &RawTable) -> Vec<ExamRecord> {
        match self {
            Layout::Regular => extract_regular(table),
            Layout::OutOfCourse => extract_out_of_course(table),
        }
    }
}

/// Build the month map from header cells at index ≥ 1, e.g. "Gennaio 2026"
/// or "FEB2026". Unrecognized columns are left out.
pub fn month_columns(header: &[String]) -> MonthColumnMap {
    header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, name)| {
            let caps = MONTH_HEADER.captures(name)?;
            let month = month_from_name(&caps[1])?;
            let year: i32 = caps[2].parse().ok()?;
            Some((idx, (month, year)))
        })
        .collect()
}

/// Normalized subject of a body row, unless the row is noise.
fn subject_of(row: &[Option<String>], noise: &[&str]) -> Option<String> {
    let subject = cell_text(row, 0)?;
    if noise.iter().any(|n| contains_upper(&subject, n)) {
        trace!(%subject, "skipping banner row");
        return None;
    }
    Some(subject)
}

/// Regular schema: one record per day number listed under a month column.
pub fn extract_regular(table: &RawTable) -> Vec<ExamRecord> {
    let Some(header) = table.header() else {
        return Vec::new();
    };
    let columns = month_columns(&header);
    if columns.is_empty() {
        debug!(?header, "regular table has no month columns");
        return Vec::new();
    }

    let mut out = Vec::new();
    for row in table.body() {
        let Some(subject) = subject_of(row, &REGULAR_NOISE) else {
            continue;
        };
        for (&idx, &(month, year)) in &columns {
            let Some(days) = cell_text(row, idx) else {
                continue;
            };
            out.extend(
                resolve_day_list(&days, month, year)
                    .into_iter()
                    .map(|date| ExamRecord::new(subject.clone(), date, RecordType::Regular)),
            );
        }
    }
    out
}

/// Out-of-course schema: every date-bearing cell after the subject is a
/// separate sitting.
pub fn extract_out_of_course(table: &RawTable) -> Vec<ExamRecord> {
    let mut out = Vec::new();
    for row in table.body() {
        let Some(subject) = subject_of(row, &OUT_OF_COURSE_NOISE) else {
            continue;
        };
        for idx in 1..row.len() {
            let Some(date) = cell_text(row, idx).and_then(|text| resolve_full_date(&text)) else {
                continue;
            };
            out.push(ExamRecord::new(
                subject.clone(),
                date,
                RecordType::OutOfCourse,
            ));
        }
    }
    out
}
