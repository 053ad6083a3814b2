use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::process::RawTable;

pub mod json;
pub mod pdf;

pub use json::JsonTableSource;
pub use pdf::PdfTableSource;

/// Failures reading a document that is present on disk.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table dump {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },
}

/// Anything that can hand over a document as pages of tables.
pub trait TableSource {
    /// Tables per page, both in document order.
    fn pages(&self) -> Result<Vec<Vec<RawTable>>, SourceError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Pick a source by file extension: `.json` dumps are read as
/// pre-extracted tables, everything else as PDF.
pub fn open_source(path: impl AsRef<Path>) -> Box<dyn TableSource> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        Box::new(JsonTableSource::new(path))
    } else {
        Box::new(PdfTableSource::new(path))
    }
}
