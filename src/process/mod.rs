// src/process/mod.rs
use anyhow::Result;
use tracing::{debug, info};

pub mod classify;
pub mod date_parser;
pub mod dedup;
pub mod layout;
pub mod raw_table;
pub mod record;
pub mod utils;

pub use dedup::dedup;
pub use layout::Layout;
pub use raw_table::RawTable;
pub use record::{ExamRecord, RecordType};

use crate::source::TableSource;

/// Run one layout pass over every table of every page, in document order.
/// Tables whose header does not carry this layout's signature are skipped.
pub fn extract_pass(layout: Layout, pages: &[Vec<RawTable>]) -> Vec<ExamRecord> {
    let mut out = Vec::new();
    for (page_idx, tables) in pages.iter().enumerate() {
        for (table_idx, table) in tables.iter().enumerate() {
            if !classify::matches(layout, table) {
                continue;
            }
            let records = layout.extract(table);
            debug!(
                ?layout,
                page = page_idx + 1,
                table = table_idx,
                records = records.len(),
                "extracted table"
            );
            out.extend(records);
        }
    }
    out
}

/// Both layout passes over one document's pages. Candidates are returned
/// as extracted; repetition is removed later by [`dedup`].
pub fn extract_pages(pages: &[Vec<RawTable>]) -> Vec<ExamRecord> {
    Layout::ALL
        .iter()
        .flat_map(|&layout| {
            let records = extract_pass(layout, pages);
            info!(?layout, count = records.len(), "layout pass done");
            records
        })
        .collect()
}

/// Pull every page from `source` and extract candidate records.
#[tracing::instrument(level = "info", skip(source), fields(doc = %source.describe()))]
pub fn extract_document(source: &dyn TableSource) -> Result<Vec<ExamRecord>> {
    let pages = source.pages()?;
    let tables: usize = pages.iter().map(Vec::len).sum();
    info!(pages = pages.len(), tables, "loaded document");
    Ok(extract_pages(&pages))
}

/// Extract from every document and return the deduplicated, canonically
/// ordered record set.
pub fn run_pipeline(sources: &[&dyn TableSource]) -> Result<Vec<ExamRecord>> {
    let mut candidates = Vec::new();
    for source in sources {
        candidates.extend(extract_document(*source)?);
    }
    let total = candidates.len();
    let unique = dedup(candidates);
    info!(candidates = total, unique = unique.len(), "deduplicated");
    Ok(unique)
}
