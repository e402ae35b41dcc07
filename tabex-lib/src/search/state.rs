//! Search state that survives row-set changes.

use std::borrow::Borrow;

use crate::model::Record;
use crate::resolve::FieldMap;

use super::SearchMode;
use super::matching_indices;

/// The query a user typed and the rows it currently selects.
///
/// The query is never cleared implicitly: replacing the row set re-applies
/// it to the new rows, so a filtered view stays filtered.
///
/// # Example
///
/// ```
/// use tabex_lib::column::Column;
/// use tabex_lib::model::Record;
/// use tabex_lib::resolve::searchable_fields;
/// use tabex_lib::search::{SearchMode, SearchState};
///
/// let columns: Vec<Column> = vec![Column::data("lastName").into()];
/// let fields = searchable_fields(&columns);
/// let first = vec![Record::new().set("lastName", "Lee"), Record::new().set("lastName", "Kim")];
/// let second = vec![Record::new().set("lastName", "Park"), Record::new().set("lastName", "Lee")];
///
/// let mut search = SearchState::new(SearchMode::Exact);
/// search.set_query("Lee", &first, &fields);
/// assert_eq!(search.visible(&first).len(), 1);
///
/// search.refresh(&second, &fields);
/// assert_eq!(search.visible(&second)[0].get("lastName"), second[1].get("lastName"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    mode: SearchMode,
    matches: Vec<usize>,
}

impl SearchState {
    /// Creates an empty search.
    pub fn new(mode: SearchMode) -> Self {
        Self {
            query: String::new(),
            mode,
            matches: Vec::new(),
        }
    }

    /// Returns the current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the match mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns `true` while a non-empty query is active.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Updates the query and re-filters `rows`.
    pub fn set_query<R: Borrow<Record>>(&mut self, query: impl Into<String>, rows: &[R], fields: &FieldMap) {
        self.query = query.into();
        self.refresh(rows, fields);
    }

    /// Changes the match mode and re-filters `rows`.
    pub fn set_mode<R: Borrow<Record>>(&mut self, mode: SearchMode, rows: &[R], fields: &FieldMap) {
        self.mode = mode;
        self.refresh(rows, fields);
    }

    /// Re-applies the current query, e.g. after the rows or fields changed.
    pub fn refresh<R: Borrow<Record>>(&mut self, rows: &[R], fields: &FieldMap) {
        self.matches = matching_indices(rows, fields, &self.query, self.mode);
    }

    /// Positions of the matching rows in the last refreshed row set.
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// The matching rows of `rows`, which must be the set last refreshed.
    pub fn visible<'a, R: Borrow<Record>>(&self, rows: &'a [R]) -> Vec<&'a Record> {
        self.matches
            .iter()
            .filter_map(|&index| rows.get(index).map(Borrow::borrow))
            .collect()
    }
}
