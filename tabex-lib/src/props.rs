//! Table configuration
//!
//! The props a table is configured with, deserializable from the camelCase
//! JSON the table component accepts. Missing keys take their defaults.

use serde::Deserialize;

use crate::export::CsvOptions;
use crate::resolve::FieldMap;
use crate::search::SearchMode;

/// Default text of the export button.
pub const DEFAULT_EXPORT_LABEL: &str = "Export to CSV";

/// Top-level table configuration.
///
/// # Example
///
/// ```
/// use tabex_lib::props::TableProps;
///
/// let props: TableProps = serde_json::from_str(
///     r#"{"searchable": true, "exportable": true, "exportableProps": {"fileName": "people"}}"#,
/// )
/// .unwrap();
/// assert!(props.searchable);
/// assert_eq!(props.exportable_props.file_name.as_deref(), Some("people"));
/// assert!(props.exportable_props.auto_pick_all_columns);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableProps {
    /// Show a search input above the table.
    pub searchable: bool,
    pub searchable_props: SearchableProps,
    /// Show an export button above the table.
    pub exportable: bool,
    pub exportable_props: ExportableProps,
}

impl TableProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables search.
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Enables search with the given settings.
    pub fn with_searchable_props(mut self, props: SearchableProps) -> Self {
        self.searchable = true;
        self.searchable_props = props;
        self
    }

    /// Enables export.
    pub fn with_exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    /// Enables export with the given settings.
    pub fn with_exportable_props(mut self, props: ExportableProps) -> Self {
        self.exportable = true;
        self.exportable_props = props;
        self
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchableProps {
    /// Subsequence matching instead of substring matching.
    ///
    /// Default: false
    pub fuzzy_search: bool,
}

impl SearchableProps {
    /// The match mode these settings select.
    pub fn mode(&self) -> SearchMode {
        if self.fuzzy_search {
            SearchMode::Fuzzy
        } else {
            SearchMode::Exact
        }
    }

    pub fn with_fuzzy_search(mut self, fuzzy: bool) -> Self {
        self.fuzzy_search = fuzzy;
        self
    }
}

/// Export settings.
///
/// # Example
///
/// ```
/// use tabex_lib::props::ExportableProps;
///
/// let props = ExportableProps::default()
///     .with_show_column_picker(true)
///     .with_file_name("people");
/// assert_eq!(props.label, "Export to CSV");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportableProps {
    /// Ask which columns to export before downloading.
    ///
    /// Default: false
    pub show_column_picker: bool,

    /// Explicit field map, replacing the one resolved from the columns.
    ///
    /// Default: none
    pub fields: Option<FieldMap>,

    /// Export columns that declare no exporter, using their title.
    ///
    /// Default: true
    pub auto_pick_all_columns: bool,

    /// File name without the `.csv` extension.
    ///
    /// Default: `table`
    pub file_name: Option<String>,

    /// Disable the export button.
    ///
    /// Default: false
    pub disabled: bool,

    /// Button text.
    ///
    /// Default: `Export to CSV`
    pub label: String,

    /// Options passed to the CSV writer.
    pub csv: CsvOptions,
}

impl Default for ExportableProps {
    fn default() -> Self {
        Self {
            show_column_picker: false,
            fields: None,
            auto_pick_all_columns: true,
            file_name: None,
            disabled: false,
            label: DEFAULT_EXPORT_LABEL.to_string(),
            csv: CsvOptions::default(),
        }
    }
}

impl ExportableProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_column_picker(mut self, show: bool) -> Self {
        self.show_column_picker = show;
        self
    }

    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_auto_pick_all_columns(mut self, auto_pick: bool) -> Self {
        self.auto_pick_all_columns = auto_pick;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_csv(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let props: TableProps = serde_json::from_str("{}").unwrap();
        assert!(!props.searchable);
        assert!(!props.exportable);
        assert_eq!(props.searchable_props.mode(), SearchMode::Exact);
        assert!(props.exportable_props.auto_pick_all_columns);
        assert_eq!(props.exportable_props.label, DEFAULT_EXPORT_LABEL);
        assert_eq!(props.exportable_props.csv, CsvOptions::default());
    }

    #[test]
    fn test_nested_props() {
        let props: TableProps = serde_json::from_str(
            r#"{
                "searchableProps": {"fuzzySearch": true},
                "exportableProps": {
                    "showColumnPicker": true,
                    "autoPickAllColumns": false,
                    "disabled": true,
                    "fields": {"name": "Name"},
                    "csv": {"delimiter": ";", "newline": "\n", "skipEmptyLines": "never"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(props.searchable_props.mode(), SearchMode::Fuzzy);
        let export = props.exportable_props;
        assert!(export.show_column_picker);
        assert!(!export.auto_pick_all_columns);
        assert!(export.disabled);
        assert_eq!(export.fields.unwrap().len(), 1);
        assert_eq!(export.csv.delimiter, ';');
        assert_eq!(export.csv.newline, crate::export::Newline::Lf);
        assert_eq!(export.csv.skip_empty_lines, crate::export::SkipEmptyLines::Never);
    }
}
