//! Table controller

use std::path::PathBuf;

use log::debug;

use crate::column::Column;
use crate::error::ExportError;
use crate::export::{DownloadSink, ExportButton, ExportOutcome};
use crate::model::Record;
use crate::props::{ExportableProps, TableProps};
use crate::resolve::{FieldMap, searchable_fields};
use crate::search::SearchState;

/// A table with its columns, rows and configuration, plus the search and
/// export state layered on top.
///
/// Rows stay in the order given. [`Table::visible_rows`] is what a renderer
/// shows and what the export button exports.
///
/// # Example
///
/// ```
/// use tabex_lib::Table;
/// use tabex_lib::column::Column;
/// use tabex_lib::export::MemorySink;
/// use tabex_lib::model::Record;
/// use tabex_lib::props::TableProps;
///
/// let columns: Vec<Column> = vec![Column::data("name").title("Name").into()];
/// let rows = vec![Record::new().set("name", "Ann"), Record::new().set("name", "Bo")];
/// let props = TableProps::new().with_searchable(true).with_exportable(true);
///
/// let mut table = Table::new(columns, rows, props);
/// table.search("bo");
/// assert_eq!(table.visible_rows().len(), 1);
///
/// let mut sink = MemorySink::new();
/// table.click_export(&mut sink).unwrap();
/// assert_eq!(sink.last_text(), Some("Name\r\nBo"));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Record>,
    props: TableProps,
    search_fields: FieldMap,
    search: SearchState,
    export: Option<ExportButton>,
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Record>, props: TableProps) -> Self {
        let search_fields = searchable_fields(&columns);
        let mut search = SearchState::new(props.searchable_props.mode());
        search.refresh(&rows, &search_fields);
        let export = props
            .exportable
            .then(|| ExportButton::new(&props.exportable_props, &columns));

        Self {
            columns,
            rows,
            props,
            search_fields,
            search,
            export,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Every row, matching or not.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    /// The fields a search looks at.
    pub fn search_fields(&self) -> &FieldMap {
        &self.search_fields
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Rows matching the current query, in order.
    pub fn visible_rows(&self) -> Vec<&Record> {
        self.search.visible(&self.rows)
    }

    pub fn export_button(&self) -> Option<&ExportButton> {
        self.export.as_ref()
    }

    pub fn export_button_mut(&mut self) -> Option<&mut ExportButton> {
        self.export.as_mut()
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Replaces the rows. The current query is applied to the new rows.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.search.refresh(&self.rows, &self.search_fields);
    }

    /// Replaces the columns, rebuilding the search and export fields.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        self.search_fields = searchable_fields(&self.columns);
        self.search.refresh(&self.rows, &self.search_fields);
        if let Some(button) = &mut self.export {
            button.refresh(&self.columns);
        }
    }

    /// Replaces the export settings, rebuilding the export fields.
    pub fn set_exportable_props(&mut self, props: ExportableProps) {
        if let Some(button) = &mut self.export {
            button.set_props(&props, &self.columns);
        } else if self.props.exportable {
            self.export = Some(ExportButton::new(&props, &self.columns));
        }
        self.props.exportable_props = props;
    }

    /// Sets the search query. Ignored unless the table is searchable.
    pub fn search(&mut self, query: impl Into<String>) {
        if !self.props.searchable {
            debug!("table is not searchable, ignoring query");
            return;
        }
        self.search.set_query(query, &self.rows, &self.search_fields);
    }

    // =========================================================================
    // Export
    // =========================================================================

    fn button(export: &mut Option<ExportButton>) -> Result<&mut ExportButton, ExportError> {
        export.as_mut().ok_or(ExportError::NotExportable)
    }

    /// Presses the export button over the visible rows.
    pub fn click_export(&mut self, sink: &mut dyn DownloadSink) -> Result<ExportOutcome, ExportError> {
        let visible = self.search.visible(&self.rows);
        Self::button(&mut self.export)?.click(&visible, sink)
    }

    /// Confirms the column picker and exports the visible rows.
    pub fn confirm_export(&mut self, sink: &mut dyn DownloadSink) -> Result<ExportOutcome, ExportError> {
        let visible = self.search.visible(&self.rows);
        Self::button(&mut self.export)?.confirm(&visible, sink)
    }

    /// Closes the column picker.
    pub fn cancel_export(&mut self) -> Result<(), ExportError> {
        Self::button(&mut self.export)?.cancel();
        Ok(())
    }

    /// Exports the visible rows restricted to `selected`, bypassing the
    /// button flow.
    pub fn export_to(&self, selected: &[&str], sink: &mut dyn DownloadSink) -> Result<PathBuf, ExportError> {
        let button = self.export.as_ref().ok_or(ExportError::NotExportable)?;
        button.export(&self.visible_rows(), selected, sink)
    }
}
