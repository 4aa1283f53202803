use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::TableSource;
use crate::types::Row;

/// Knowledge tables stored as CSV files with a header row under one directory.
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    root: PathBuf,
}

impl CsvTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    fn read_rows(source_id: &str, path: &Path) -> Result<Vec<Row>> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path).map_err(|e| table_error(source_id, e))?;
        let headers = reader.headers().map_err(|e| table_error(source_id, e))?.clone();
        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| table_error(source_id, e))?;
            rows.push(headers.iter().zip(record.iter()).map(|(h, v)| (h.to_string(), v.to_string())).collect());
        }
        Ok(rows)
    }
}

impl TableSource for CsvTableStore {
    fn load(&self, source_id: &str) -> Result<Vec<Row>> {
        let path = self.locate(source_id);
        if !path.is_file() {
            return Err(Error::SourceUnavailable { source_id: source_id.to_string(), path });
        }
        let rows = Self::read_rows(source_id, &path)?;
        debug!(source = source_id, rows = rows.len(), "loaded table");
        Ok(rows)
    }

    fn locate(&self, source_id: &str) -> PathBuf { self.root.join(source_id) }
}

/// I/O failures stay I/O errors; everything else the reader rejects is a
/// malformed table.
fn table_error(source_id: &str, err: csv::Error) -> Error {
    if !err.is_io_error() {
        return Error::MalformedTable { source_id: source_id.to_string(), reason: err.to_string() };
    }
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::MalformedTable { source_id: source_id.to_string(), reason: format!("{:?}", other) },
    }
}

/// Builds one searchable text per row by joining the `search_columns`
/// values with single spaces. Absent columns contribute an empty string.
pub fn build_documents<S: AsRef<str>>(rows: &[Row], search_columns: &[S]) -> Vec<String> {
    rows.iter()
        .map(|row| search_columns.iter().map(|c| row.value(c.as_ref())).collect::<Vec<_>>().join(" "))
        .collect()
}
