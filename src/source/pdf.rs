use pdfplumber::{Page, Pdf, TableSettings};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::{SourceError, TableSource};
use crate::process::RawTable;

/// Reads a PDF with pdfplumber and takes its ruled tables cell by cell.
pub struct PdfTableSource {
    path: PathBuf,
}

impl PdfTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for PdfTableSource {
    fn pages(&self) -> Result<Vec<Vec<RawTable>>, SourceError> {
        let pdf = Pdf::open_file(&self.path, None).map_err(|e| SourceError::Pdf {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let mut pages = Vec::with_capacity(pdf.page_count());
        for idx in 0..pdf.page_count() {
            let page = match pdf.page(idx) {
                Ok(p) => p,
                Err(e) => {
                    warn!(page = idx + 1, error = %e, "page extraction failed");
                    pages.push(Vec::new());
                    continue;
                }
            };
            let tables = tables_from_page(&page);
            debug!(page = idx + 1, tables = tables.len(), "extracted tables");
            pages.push(tables);
        }
        Ok(pages)
    }

    fn describe(&self) -> String {
        format!("pdf:{}", self.path.display())
    }
}

/// Tables of one page in extraction order. Cells are placed by the ruling
/// lines of the grid, so an empty cell stays `None` in its own column.
pub fn tables_from_page(page: &Page) -> Vec<RawTable> {
    page.extract_tables(&TableSettings::default())
        .into_iter()
        .map(RawTable::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{extract_pages, ExamRecord, RecordType};
    use chrono::NaiveDate;
    use pdfplumber::{BBox, Char, Color, Line, LineOrientation, TextDirection};

    const COLS: [f64; 4] = [10.0, 110.0, 210.0, 310.0];
    const ROWS: [f64; 3] = [10.0, 30.0, 50.0];
    const CHAR_W: f64 = 5.0;

    fn make_char(text: &str, x0: f64, top: f64) -> Char {
        Char {
            text: text.to_string(),
            bbox: BBox::new(x0, top, x0 + CHAR_W, top + 10.0),
            fontname: "TestFont".to_string(),
            size: 10.0,
            doctop: top,
            upright: true,
            direction: TextDirection::Ltr,
            stroking_color: None,
            non_stroking_color: None,
            ctm: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            char_code: 0,
        }
    }

    fn make_line(x0: f64, top: f64, x1: f64, bottom: f64, orientation: LineOrientation) -> Line {
        Line {
            x0,
            top,
            x1,
            bottom,
            line_width: 1.0,
            stroke_color: Color::black(),
            orientation,
        }
    }

    /// Lay out `cells[row][col]` inside a fully ruled 3-column grid.
    fn grid_page(cells: [[&str; 3]; 2]) -> Page {
        let mut lines = Vec::new();
        for &y in &ROWS {
            lines.push(make_line(COLS[0], y, COLS[3], y, LineOrientation::Horizontal));
        }
        for &x in &COLS {
            lines.push(make_line(x, ROWS[0], x, ROWS[2], LineOrientation::Vertical));
        }

        let mut chars = Vec::new();
        for (r, row) in cells.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                let left = COLS[c] + 5.0;
                for (i, ch) in text.chars().enumerate() {
                    chars.push(make_char(&ch.to_string(), left + i as f64 * CHAR_W, ROWS[r] + 5.0));
                }
            }
        }
        Page::with_geometry(0, 612.0, 792.0, chars, lines, vec![], vec![])
    }

    #[test]
    fn test_blank_middle_cell_keeps_its_column() {
        let page = grid_page([["Materia", "GEN2026", "FEB2026"], ["Fisica", "", "2,23"]]);
        let tables = tables_from_page(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].rows,
            vec![
                vec![
                    Some("Materia".to_string()),
                    Some("GEN2026".to_string()),
                    Some("FEB2026".to_string()),
                ],
                vec![Some("Fisica".to_string()), None, Some("2,23".to_string())],
            ]
        );

        let ymd = |d| NaiveDate::from_ymd_opt(2026, 2, d).unwrap();
        assert_eq!(
            extract_pages(&[tables]),
            vec![
                ExamRecord::new("Fisica", ymd(2), RecordType::Regular),
                ExamRecord::new("Fisica", ymd(23), RecordType::Regular),
            ]
        );
    }

    #[test]
    fn test_page_without_rules_has_no_tables() {
        let page = Page::new(0, 612.0, 792.0, vec![make_char("A", 10.0, 10.0)]);
        assert!(tables_from_page(&page).is_empty());
    }

    #[test]
    fn test_unreadable_pdf() {
        let err = PdfTableSource::new("/nonexistent/esami.pdf")
            .pages()
            .unwrap_err();
        assert!(matches!(err, SourceError::Pdf { .. }));
    }
}
