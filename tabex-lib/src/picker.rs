//! Column picker
//!
//! Checklist state for choosing which resolved fields to export. Every field
//! starts checked, and rebuilding the field map checks everything again.

use std::collections::HashSet;

use crate::error::ExportError;
use crate::resolve::FieldMap;

/// Title of the picker dialog.
pub const PICKER_TITLE: &str = "Select columns to export";

/// Label of the confirm action.
pub const CONFIRM_LABEL: &str = "Export";

/// Shown while the confirm action is unavailable.
pub const EMPTY_SELECTION_REASON: &str = "Please select at least one column.";

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry<'a> {
    pub field: &'a str,
    pub label: &'a str,
    pub checked: bool,
}

/// Tracks which export fields are selected.
///
/// # Example
///
/// ```
/// use tabex_lib::picker::ColumnPicker;
/// use tabex_lib::resolve::FieldMap;
///
/// let fields = FieldMap::new().with("name", "Name").with("age", "Age");
/// let mut picker = ColumnPicker::new(&fields);
/// assert_eq!(picker.selected_in_order(), ["name", "age"]);
///
/// picker.toggle("name");
/// picker.toggle("age");
/// assert!(!picker.can_confirm());
/// assert_eq!(picker.confirm_disabled_reason(), Some("Please select at least one column."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnPicker {
    options: Vec<(String, String)>,
    selected: HashSet<String>,
}

impl ColumnPicker {
    /// Creates a picker over `fields` with everything selected.
    pub fn new(fields: &FieldMap) -> Self {
        let mut picker = Self::default();
        picker.reset(fields);
        picker
    }

    /// Replaces the options with `fields` and selects all of them.
    pub fn reset(&mut self, fields: &FieldMap) {
        self.options = fields
            .iter()
            .map(|(field, entry)| (field.clone(), entry.header().to_string()))
            .collect();
        self.select_all();
    }

    fn knows(&self, field: &str) -> bool {
        self.options.iter().any(|(f, _)| f == field)
    }

    /// Flips one field. Returns false for unknown fields.
    pub fn toggle(&mut self, field: &str) -> bool {
        if !self.knows(field) {
            return false;
        }
        if !self.selected.remove(field) {
            self.selected.insert(field.to_string());
        }
        true
    }

    /// Checks or unchecks one field. Returns false for unknown fields.
    pub fn set_checked(&mut self, field: &str, checked: bool) -> bool {
        if !self.knows(field) {
            return false;
        }
        if checked {
            self.selected.insert(field.to_string());
        } else {
            self.selected.remove(field);
        }
        true
    }

    pub fn is_selected(&self, field: &str) -> bool {
        self.selected.contains(field)
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().map(|(field, _)| field.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Checklist lines in field order.
    pub fn entries(&self) -> impl Iterator<Item = PickerEntry<'_>> {
        self.options.iter().map(|(field, label)| PickerEntry {
            field,
            label,
            checked: self.selected.contains(field),
        })
    }

    /// Selected fields in field order.
    pub fn selected_in_order(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|(field, _)| field.as_str())
            .filter(|field| self.selected.contains(*field))
            .collect()
    }

    pub fn can_confirm(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn confirm_disabled_reason(&self) -> Option<&'static str> {
        (!self.can_confirm()).then_some(EMPTY_SELECTION_REASON)
    }

    /// The selection to export, or an error when nothing is selected.
    pub fn confirm(&self) -> Result<Vec<&str>, ExportError> {
        if !self.can_confirm() {
            return Err(ExportError::NothingSelected);
        }
        Ok(self.selected_in_order())
    }
}
