//! Free-text row search
//!
//! A row matches when any of its resolved fields contains the query. Only
//! scalar values are searched; nulls, lists, nested records and missing
//! paths never match. Row order is always preserved.

mod matcher;
mod state;

pub use matcher::*;
pub use state::*;

use std::borrow::Borrow;

use log::debug;

use crate::model::Record;
use crate::resolve::FieldMap;

/// Returns the rows matching `query`, in their original order.
///
/// An empty query returns every row.
///
/// # Example
///
/// ```
/// use tabex_lib::column::Column;
/// use tabex_lib::model::Record;
/// use tabex_lib::resolve::searchable_fields;
/// use tabex_lib::search::{filter_rows, SearchMode};
///
/// let columns: Vec<Column> = vec![Column::data("firstName").into(), Column::data("lastName").into()];
/// let rows = vec![
///     Record::new().set("firstName", "Ann").set("lastName", "Lee"),
///     Record::new().set("firstName", "Bo").set("lastName", "Lee"),
/// ];
/// let fields = searchable_fields(&columns);
///
/// assert_eq!(filter_rows(&rows, &fields, "Ann", SearchMode::Exact).len(), 1);
/// assert_eq!(filter_rows(&rows, &fields, "Lee", SearchMode::Exact).len(), 2);
/// ```
pub fn filter_rows<'a, R>(rows: &'a [R], fields: &FieldMap, query: &str, mode: SearchMode) -> Vec<&'a Record>
where
    R: Borrow<Record>,
{
    matching_indices(rows, fields, query, mode)
        .into_iter()
        .map(move |index| rows[index].borrow())
        .collect()
}

/// Positions of the rows matching `query`, ascending.
pub fn matching_indices<R>(rows: &[R], fields: &FieldMap, query: &str, mode: SearchMode) -> Vec<usize>
where
    R: Borrow<Record>,
{
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let mut matcher = QueryMatcher::new(query, mode);
    let indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches((*row).borrow(), fields, &mut matcher))
        .map(|(index, _)| index)
        .collect();

    debug!(
        "query {:?} ({:?}) matched {} of {} row(s) across {} field(s)",
        query,
        mode,
        indices.len(),
        rows.len(),
        fields.len()
    );
    indices
}

/// Returns `true` if any field of `row` satisfies the matcher.
pub fn row_matches(row: &Record, fields: &FieldMap, matcher: &mut QueryMatcher) -> bool {
    fields.keys().any(|field| {
        row.get_path(field)
            .and_then(|value| value.search_text())
            .is_some_and(|text| matcher.matches(&text))
    })
}
