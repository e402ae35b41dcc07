//! CSV export
//!
//! Export runs in three steps: [`build_export_grid`] projects rows onto the
//! selected fields, [`serialize`] turns the grid into delimited text, and a
//! [`DownloadSink`] saves it as `<file name>.csv`. [`ExportButton`] drives
//! the whole flow, optionally through a column picker.

mod button;
mod delimited;
mod download;

pub use button::*;
pub use delimited::*;
pub use download::*;

use std::borrow::Borrow;

use log::debug;

use crate::model::Record;
use crate::resolve::FieldMap;

/// A header row plus one row of cells per exported record.
///
/// A grid built from no records is empty altogether: exporting nothing must
/// not produce a header-only file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportGrid {
    /// Header cells, one per selected field.
    pub header: Vec<String>,
    /// Data cells, row by row.
    pub records: Vec<Vec<String>>,
}

impl ExportGrid {
    /// Creates a grid from a header and records.
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { header, records }
    }

    /// Returns `true` if the grid holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header followed by records; nothing at all when there are no records.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<String>> {
        let header = (!self.is_empty()).then_some(&self.header);
        header.into_iter().chain(self.records.iter())
    }
}

/// Projects `rows` onto the `selected` fields of `fields`.
///
/// Selected identifiers missing from `fields` are dropped, and the remaining
/// columns follow the field map's order whatever order they were selected
/// in. Labelled fields export the raw row value; fields with an export
/// descriptor go through its formatter (or export empty without one).
///
/// # Example
///
/// ```
/// use tabex_lib::export::build_export_grid;
/// use tabex_lib::model::Record;
/// use tabex_lib::resolve::FieldMap;
///
/// let fields = FieldMap::new().with("name", "Name").with("phone", "Phone");
/// let rows = vec![Record::new().set("name", "Ann").set("phone", 12345)];
///
/// let grid = build_export_grid(&rows, &fields, ["phone", "name"].iter().copied());
/// assert_eq!(grid.header, ["Name", "Phone"]);
/// assert_eq!(grid.records, [["Ann", "12345"]]);
/// ```
pub fn build_export_grid<'a, R, I, S>(rows: &[R], fields: &FieldMap, selected: I) -> ExportGrid
where
    R: Borrow<Record>,
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    if rows.is_empty() {
        return ExportGrid::default();
    }

    let columns = fields.select(selected);
    let header = columns.iter().map(|(_, entry)| entry.header().to_string()).collect();
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let row: &Record = row.borrow();
            columns
                .iter()
                .map(|(field, entry)| entry.export_value(field, row, index).to_text())
                .collect()
        })
        .collect();

    debug!("built export grid: {} column(s), {} row(s)", columns.len(), rows.len());
    ExportGrid { header, records }
}
