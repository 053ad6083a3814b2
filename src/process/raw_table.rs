use serde::Deserialize;

use super::utils::normalize_cell;

/// One table as handed over by a document source: rows of optional text
/// cells, in extraction order. Row 0 is the header candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    /// Each row, as a Vec of cells. `None` is an empty cell in the PDF grid.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Convenience constructor for fully populated grids.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        }
    }

    /// Header row with each cell normalized, or `None` when the table or its
    /// first row is empty.
    pub fn header(&self) -> Option<Vec<String>> {
        let first = self.rows.first()?;
        if first.is_empty() {
            return None;
        }
        Some(
            first
                .iter()
                .map(|cell| cell.as_deref().map(normalize_cell).unwrap_or_default())
                .collect(),
        )
    }

    /// Rows after the header.
    pub fn body(&self) -> &[Vec<Option<String>>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}
