use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Three-letter Italian month prefixes. Full names ("GENNAIO") and
/// abbreviations ("GEN") both resolve through this one table.
const MONTHS: [(&str, u32); 12] = [
    ("GEN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAG", 5),
    ("GIU", 6),
    ("LUG", 7),
    ("AGO", 8),
    ("SET", 9),
    ("OTT", 10),
    ("NOV", 11),
    ("DIC", 12),
];

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit regex"));

static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})\s+([A-Za-z]+)\s+([0-9]{4})").expect("full date regex")
});

/// Map an Italian month token to 1..=12 by its first three letters,
/// case-insensitively.
pub fn month_from_name(token: &str) -> Option<u32> {
    let key: String = token.chars().take(3).collect::<String>().to_uppercase();
    MONTHS
        .iter()
        .find(|(prefix, _)| *prefix == key)
        .map(|&(_, month)| month)
}

/// Parse every run of digits in `text` as a day of `month`/`year`.
///
/// `"1, 21"` and `"2 e 22"` both yield two dates. Runs that do not form a
/// valid date are skipped; order follows the text.
pub fn resolve_day_list(text: &str, month: u32, year: i32) -> Vec<NaiveDate> {
    DIGIT_RUN
        .find_iter(text)
        .filter_map(|m| {
            let day: u32 = m.as_str().parse().ok()?;
            let date = NaiveDate::from_ymd_opt(year, month, day);
            if date.is_none() {
                trace!(day, month, year, "dropping invalid day");
            }
            date
        })
        .collect()
}

/// Find the first `<day> <month name> <year>` phrase in `text`,
/// e.g. `"30 ottobre 2025"` or `"30 OTT 2025"`.
pub fn resolve_full_date(text: &str) -> Option<NaiveDate> {
    let caps = FULL_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_from_name(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
