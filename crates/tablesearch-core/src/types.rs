//! Row records and the response shapes handed to presentation layers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One record of a knowledge table, keyed by column name.
///
/// Columns keep their insertion order so a projected row serializes in the
/// order its output columns were declared. Reading a column the row does not
/// carry yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self { Self::default() }

    /// Sets `column` to `value`. A repeated column keeps its first position
    /// and takes the latest value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v.as_str())
    }

    pub fn value(&self, column: &str) -> &str { self.get(column).unwrap_or("") }

    pub fn contains(&self, column: &str) -> bool { self.get(column).is_some() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Keeps only `columns`, in that order. Columns the row lacks are omitted
    /// rather than filled in.
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Row {
        columns
            .iter()
            .filter_map(|c| self.get(c.as_ref()).map(|v| (c.as_ref().to_string(), v.to_string())))
            .collect()
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Rows matched by one search call.
///
/// `domain` is the resolved domain key, or `"industry"` for industry
/// searches, in which case `industry` names the vertical. `file` is the
/// source identifier the rows came from.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub query: String,
    pub file: String,
    pub count: usize,
    pub results: Vec<Row>,
}

/// A failed search. Never carries partial results.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResult {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// What a search call hands back: rows or a described failure.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SearchResponse {
    Found(SearchResult),
    Failed(ErrorResult),
}

impl SearchResponse {
    pub fn is_error(&self) -> bool { matches!(self, SearchResponse::Failed(_)) }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            SearchResponse::Found(r) => Some(r),
            SearchResponse::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            SearchResponse::Found(_) => None,
            SearchResponse::Failed(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        let mut row = Row::new();
        row.insert("Metric Name", "Churn Rate");
        row.insert("Formula", "lost / start");
        row.insert("Abbreviation", "");
        row
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let row = sample_row();
        assert_eq!(row.value("Industry"), "");
        assert!(!row.contains("Industry"));
        assert!(row.contains("Abbreviation"));
    }

    #[test]
    fn repeated_column_keeps_position() {
        let mut row = sample_row();
        row.insert("Metric Name", "Logo Churn");
        let cols: Vec<&str> = row.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["Metric Name", "Formula", "Abbreviation"]);
        assert_eq!(row.value("Metric Name"), "Logo Churn");
    }

    #[test]
    fn project_follows_requested_order_and_skips_absent() {
        let row = sample_row();
        let projected = row.project(&["Formula", "Visualization", "Metric Name"]);
        let cols: Vec<&str> = projected.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["Formula", "Metric Name"]);
    }

    #[test]
    fn row_serializes_in_column_order() {
        let row = sample_row().project(&["Formula", "Metric Name"]);
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"Formula":"lost / start","Metric Name":"Churn Rate"}"#);
    }

    #[test]
    fn error_response_serializes_flat() {
        let resp = SearchResponse::Failed(ErrorResult {
            error: "File not found: data/metrics.csv".to_string(),
            domain: Some("metric".to_string()),
            industry: None,
        });
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["error"], "File not found: data/metrics.csv");
        assert_eq!(json["domain"], "metric");
        assert!(json.get("industry").is_none());
        assert!(resp.is_error());
    }
}
