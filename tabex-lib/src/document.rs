//! Table documents
//!
//! A JSON file bundling a table's columns, its rows and its props:
//!
//! ```json
//! {
//!   "columns": [{"title": "Name", "dataIndex": "name"}],
//!   "dataSource": [{"name": "Ann"}],
//!   "searchable": true,
//!   "exportable": true,
//!   "exportableProps": {"fileName": "people"}
//! }
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::Table;
use crate::column::Column;
use crate::error::DocumentError;
use crate::model::Record;
use crate::props::TableProps;

/// A parsed table document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableDocument {
    pub columns: Vec<Column>,
    pub data_source: Vec<Record>,
    #[serde(flatten)]
    pub props: TableProps,
}

impl TableDocument {
    /// Reads and parses a document file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let document = Self::from_json(&text)?;
        debug!(
            "loaded {}: {} column(s), {} row(s)",
            path.display(),
            document.columns.len(),
            document.data_source.len()
        );
        Ok(document)
    }

    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the table the document describes.
    pub fn into_table(self) -> Table {
        Table::new(self.columns, self.data_source, self.props)
    }
}

impl FromStr for TableDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc: TableDocument = r#"{
            "columns": [{"title": "Name", "dataIndex": "name"}],
            "dataSource": [{"name": "Ann"}, {"name": "Bo"}],
            "searchable": true,
            "searchableProps": {"fuzzySearch": true}
        }"#
        .parse()
        .unwrap();
        assert_eq!(doc.columns.len(), 1);
        assert_eq!(doc.data_source.len(), 2);
        assert!(doc.props.searchable);
        assert!(doc.props.searchable_props.fuzzy_search);
        assert!(!doc.props.exportable);
    }

    #[test]
    fn test_unknown_formatter_is_an_error() {
        let err = TableDocument::from_json(r#"{"columns": [{"dataIndex": "a", "exporter": "shout"}]}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TableDocument::from_path("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
