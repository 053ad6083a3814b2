use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use super::{SourceError, TableSource};
use crate::process::RawTable;

/// Tables already extracted by an external tool, stored as JSON:
/// pages → tables → rows → cells, with `null` for empty cells.
pub struct JsonTableSource {
    path: PathBuf,
}

impl JsonTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for JsonTableSource {
    fn pages(&self) -> Result<Vec<Vec<RawTable>>, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
