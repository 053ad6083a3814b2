use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

use crate::process::{dedup, ExamRecord, RecordType};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS appelli (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    materia TEXT NOT NULL,
    data_esame TEXT NOT NULL,
    tipo TEXT NOT NULL,
    UNIQUE(materia, data_esame, tipo)
);
";

/// Row as shown to users: date rendered `DD-MM-YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredExam {
    pub id: i64,
    pub subject: String,
    pub date: String,
    pub record_type: String,
}

/// Outcome of [`ExamStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    /// Distinct records handed to the database.
    pub unique: usize,
    /// Rows actually added; the rest were already stored.
    pub inserted: usize,
}

/// SQLite-backed exam table. Dates are stored `YYYY-MM-DD` so that text
/// order is calendar order.
pub struct ExamStore {
    conn: Connection,
}

impl ExamStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the table if needed, optionally emptying it.
    pub fn init_schema(&self, clear_existing: bool) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("creating appelli table")?;
        if clear_existing {
            let removed = self.conn.execute("DELETE FROM appelli", [])?;
            debug!(removed, "cleared existing rows");
        }
        Ok(())
    }

    /// Deduplicate `records` and insert those not already present.
    pub fn save(&mut self, records: Vec<ExamRecord>) -> Result<SaveReport> {
        if records.is_empty() {
            return Ok(SaveReport {
                unique: 0,
                inserted: 0,
            });
        }
        let unique = dedup(records);

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO appelli (materia, data_esame, tipo) VALUES (?1, ?2, ?3)",
            )?;
            for rec in &unique {
                inserted += stmt.execute(params![
                    rec.subject,
                    rec.iso_date(),
                    rec.record_type.as_str()
                ])?;
            }
        }
        tx.commit().context("committing exams")?;

        info!(unique = unique.len(), inserted, "saved exams");
        Ok(SaveReport {
            unique: unique.len(),
            inserted,
        })
    }

    /// Every stored exam, ordered by date then subject.
    pub fn list_all(&self) -> Result<Vec<StoredExam>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, materia, strftime('%d-%m-%Y', data_esame), tipo
             FROM appelli
             ORDER BY data_esame, materia, tipo",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredExam {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    date: row.get(2)?,
                    record_type: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Exams whose subject contains `filter`, ignoring case. Same order as
    /// [`list_all`](Self::list_all).
    pub fn search(&self, filter: &str) -> Result<Vec<StoredExam>> {
        let needle = filter.to_lowercase();
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|exam| exam.subject.to_lowercase().contains(&needle))
            .collect())
    }

    /// Stored exams as records, optionally filtered like [`search`](Self::search).
    pub fn fetch_for_calendar(&self, filter: Option<&str>) -> Result<Vec<ExamRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT materia, data_esame, tipo
             FROM appelli
             ORDER BY data_esame, materia, tipo",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let needle = filter.filter(|f| !f.is_empty()).map(str::to_lowercase);
        let mut out = Vec::with_capacity(rows.len());
        for (subject, date, tipo) in rows {
            if let Some(needle) = &needle {
                if !subject.to_lowercase().contains(needle) {
                    continue;
                }
            }
            let exam_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("stored date {:?} for {}", date, subject))?;
            let record_type = RecordType::from_str(&tipo)
                .with_context(|| format!("stored type {:?} for {}", tipo, subject))?;
            out.push(ExamRecord::new(subject, exam_date, record_type));
        }
        Ok(out)
    }
}
