//! The export button and its picker dialog flow.

use std::borrow::Borrow;
use std::path::PathBuf;

use log::{debug, info};

use crate::column::Column;
use crate::error::ExportError;
use crate::model::Record;
use crate::picker::ColumnPicker;
use crate::props::ExportableProps;
use crate::resolve::{FieldMap, export_fields};

use super::{DownloadSink, build_export_grid, csv_file_name, serialize};

/// What a button interaction led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The column picker is now open; nothing was exported yet.
    PickerOpened,
    /// A file was saved at this path.
    Downloaded(PathBuf),
    /// Nothing happened.
    Ignored,
}

/// Export button state: the resolved fields, the column picker and whether
/// its dialog is open.
///
/// # Example
///
/// ```
/// use tabex_lib::column::Column;
/// use tabex_lib::export::{ExportButton, ExportOutcome, MemorySink};
/// use tabex_lib::model::Record;
/// use tabex_lib::props::ExportableProps;
///
/// let columns: Vec<Column> = vec![Column::data("name").title("Name").into()];
/// let rows = vec![Record::new().set("name", "Ann")];
/// let mut button = ExportButton::new(&ExportableProps::default().with_file_name("people"), &columns);
/// let mut sink = MemorySink::new();
///
/// let outcome = button.click(&rows, &mut sink).unwrap();
/// assert!(matches!(outcome, ExportOutcome::Downloaded(_)));
/// assert_eq!(sink.last(), Some(("people.csv", &b"Name\r\nAnn"[..])));
/// ```
#[derive(Debug, Clone)]
pub struct ExportButton {
    props: ExportableProps,
    fields: FieldMap,
    picker: ColumnPicker,
    picker_open: bool,
}

impl ExportButton {
    pub fn new(props: &ExportableProps, columns: &[Column]) -> Self {
        let fields = export_fields(columns, props);
        let picker = ColumnPicker::new(&fields);
        Self {
            props: props.clone(),
            fields,
            picker,
            picker_open: false,
        }
    }

    /// Rebuilds the field map from `columns`. The picker selects everything
    /// again.
    pub fn refresh(&mut self, columns: &[Column]) {
        self.fields = export_fields(columns, &self.props);
        self.picker.reset(&self.fields);
    }

    /// Replaces the settings and rebuilds the field map.
    pub fn set_props(&mut self, props: &ExportableProps, columns: &[Column]) {
        self.props = props.clone();
        self.refresh(columns);
    }

    pub fn props(&self) -> &ExportableProps {
        &self.props
    }

    pub fn label(&self) -> &str {
        &self.props.label
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn picker(&self) -> &ColumnPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut ColumnPicker {
        &mut self.picker
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// The download's file name.
    pub fn file_name(&self) -> String {
        csv_file_name(self.props.file_name.as_deref())
    }

    /// Presses the button.
    ///
    /// A disabled button ignores the press. With the column picker enabled
    /// the picker opens; otherwise every field is exported right away.
    pub fn click<R: Borrow<Record>>(
        &mut self,
        rows: &[R],
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportOutcome, ExportError> {
        if self.props.disabled {
            debug!("export button is disabled, ignoring click");
            return Ok(ExportOutcome::Ignored);
        }
        if self.props.show_column_picker {
            self.picker_open = true;
            return Ok(ExportOutcome::PickerOpened);
        }

        let all: Vec<&str> = self.fields.keys().collect();
        self.export(rows, &all, sink).map(ExportOutcome::Downloaded)
    }

    /// Confirms the picker dialog and exports the checked fields.
    ///
    /// With nothing checked the dialog stays open and
    /// [`ExportError::NothingSelected`] is returned. Otherwise the dialog
    /// closes before the export runs.
    pub fn confirm<R: Borrow<Record>>(
        &mut self,
        rows: &[R],
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportOutcome, ExportError> {
        if !self.picker_open {
            return Ok(ExportOutcome::Ignored);
        }
        if !self.picker.can_confirm() {
            return Err(ExportError::NothingSelected);
        }
        self.picker_open = false;

        let selected = self.picker.confirm()?;
        self.export(rows, &selected, sink).map(ExportOutcome::Downloaded)
    }

    /// Closes the picker dialog without exporting.
    pub fn cancel(&mut self) {
        self.picker_open = false;
    }

    /// Serializes `rows` restricted to `selected`.
    pub fn render_csv<R: Borrow<Record>>(&self, rows: &[R], selected: &[&str]) -> Result<String, ExportError> {
        let grid = build_export_grid(rows, &self.fields, selected.iter().copied());
        serialize(&grid, &self.props.csv)
    }

    /// Exports `rows` restricted to `selected` into `sink`.
    pub fn export<R: Borrow<Record>>(
        &self,
        rows: &[R],
        selected: &[&str],
        sink: &mut dyn DownloadSink,
    ) -> Result<PathBuf, ExportError> {
        if self.props.disabled {
            return Err(ExportError::Disabled);
        }
        let text = self.render_csv(rows, selected)?;
        let path = sink.save(&self.file_name(), text.as_bytes())?;
        info!("exported {} row(s) to {}", rows.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemorySink;

    fn columns() -> Vec<Column> {
        vec![
            Column::data("name").title("Name").into(),
            Column::data("age").title("Age").into(),
        ]
    }

    fn rows() -> Vec<Record> {
        vec![Record::new().set("name", "Ann").set("age", 31)]
    }

    #[test]
    fn test_picker_flow() {
        let props = ExportableProps::default().with_show_column_picker(true);
        let mut button = ExportButton::new(&props, &columns());
        let mut sink = MemorySink::new();

        assert_eq!(button.click(&rows(), &mut sink).unwrap(), ExportOutcome::PickerOpened);
        assert!(button.is_picker_open());
        assert!(sink.downloads().is_empty());

        button.picker_mut().toggle("name");
        let outcome = button.confirm(&rows(), &mut sink).unwrap();
        assert_eq!(outcome, ExportOutcome::Downloaded(PathBuf::from("table.csv")));
        assert!(!button.is_picker_open());
        assert_eq!(sink.last_text(), Some("Age\r\n31"));
    }

    #[test]
    fn test_confirm_with_empty_selection_keeps_dialog() {
        let props = ExportableProps::default().with_show_column_picker(true);
        let mut button = ExportButton::new(&props, &columns());
        let mut sink = MemorySink::new();
        button.click(&rows(), &mut sink).unwrap();
        button.picker_mut().clear();

        let err = button.confirm(&rows(), &mut sink).unwrap_err();
        assert!(matches!(err, ExportError::NothingSelected));
        assert!(button.is_picker_open());
        assert!(sink.downloads().is_empty());
    }

    #[test]
    fn test_cancel_has_no_side_effects() {
        let props = ExportableProps::default().with_show_column_picker(true);
        let mut button = ExportButton::new(&props, &columns());
        let mut sink = MemorySink::new();
        button.click(&rows(), &mut sink).unwrap();
        button.cancel();
        assert!(!button.is_picker_open());
        assert_eq!(button.confirm(&rows(), &mut sink).unwrap(), ExportOutcome::Ignored);
        assert!(sink.downloads().is_empty());
    }

    #[test]
    fn test_disabled_button() {
        let props = ExportableProps::default().with_disabled(true);
        let mut button = ExportButton::new(&props, &columns());
        let mut sink = MemorySink::new();
        assert_eq!(button.click(&rows(), &mut sink).unwrap(), ExportOutcome::Ignored);
        assert!(matches!(
            button.export(&rows(), &["name"], &mut sink),
            Err(ExportError::Disabled)
        ));
    }

    #[test]
    fn test_refresh_resets_picker() {
        let mut button = ExportButton::new(&ExportableProps::default(), &columns());
        button.picker_mut().clear();
        let more: Vec<Column> = vec![Column::data("email").into()];
        button.refresh(&more);
        assert_eq!(button.picker().selected_in_order(), ["email"]);
    }

    #[test]
    fn test_set_props_reselects_override_fields() {
        let mut button = ExportButton::new(&ExportableProps::default(), &columns());
        button.picker_mut().toggle("age");
        let props = ExportableProps::default()
            .with_fields(FieldMap::new().with("age", "Years").with("email", "Email"))
            .with_file_name("people");
        button.set_props(&props, &columns());

        assert_eq!(button.picker().selected_in_order(), ["age", "email"]);
        assert_eq!(button.file_name(), "people.csv");
        assert_eq!(button.fields().get("age").unwrap().header(), "Years");
    }
}
