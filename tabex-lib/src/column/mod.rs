//! Column descriptors
//!
//! A table's columns form a tree: leaf columns bind to a row field, group
//! columns only nest other columns under a shared header.

mod column_serde;
mod exporter;

pub use exporter::*;

use std::fmt;

/// A column's stable key, textual or numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Text(String),
    Number(i64),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Text(s) => f.write_str(s),
            ColumnKey::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ColumnKey {
    fn from(v: &str) -> Self {
        ColumnKey::Text(v.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(v: String) -> Self {
        ColumnKey::Text(v)
    }
}

impl From<i64> for ColumnKey {
    fn from(v: i64) -> Self {
        ColumnKey::Number(v)
    }
}

impl From<i32> for ColumnKey {
    fn from(v: i32) -> Self {
        ColumnKey::Number(v.into())
    }
}

/// Where a leaf column reads its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIndex {
    /// A single top-level field name.
    Name(String),
    /// An ordered path into nested records.
    Path(Vec<ColumnKey>),
}

impl DataIndex {
    /// The dotted field identifier for this index.
    pub fn field_name(&self) -> String {
        match self {
            DataIndex::Name(name) => name.clone(),
            DataIndex::Path(segments) => segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("."),
        }
    }
}

impl From<&str> for DataIndex {
    fn from(v: &str) -> Self {
        DataIndex::Name(v.to_string())
    }
}

impl From<String> for DataIndex {
    fn from(v: String) -> Self {
        DataIndex::Name(v)
    }
}

impl<const N: usize> From<[&str; N]> for DataIndex {
    fn from(v: [&str; N]) -> Self {
        DataIndex::Path(v.into_iter().map(ColumnKey::from).collect())
    }
}

impl From<Vec<ColumnKey>> for DataIndex {
    fn from(v: Vec<ColumnKey>) -> Self {
        DataIndex::Path(v)
    }
}

/// A column bound to a row field.
///
/// # Example
///
/// ```
/// use tabex_lib::column::{Column, Formatter};
/// use tabex_lib::model::Value;
///
/// let column = Column::data(["contact", "name"])
///     .title("Contact")
///     .formatter(Formatter::new(|value, _, _| {
///         value.map(|v| Value::from(v.to_text().to_uppercase())).unwrap_or_default()
///     }));
///
/// assert_eq!(column.field_name().as_deref(), Some("contact.name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafColumn {
    /// Display label.
    pub title: Option<String>,
    /// Stable key, used when no data index is given.
    pub key: Option<ColumnKey>,
    /// Field name or nested path.
    pub data_index: Option<DataIndex>,
    /// How this column is exported.
    pub exporter: Option<Exporter>,
}

impl LeafColumn {
    /// Creates an empty leaf column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display label.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the column key.
    pub fn key(mut self, key: impl Into<ColumnKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the data index.
    pub fn data_index(mut self, data_index: impl Into<DataIndex>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }

    /// Sets the exporter.
    pub fn exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Exports this column through `formatter`, titled like the column.
    pub fn formatter(self, formatter: Formatter) -> Self {
        self.exporter(Exporter::Formatter(formatter))
    }

    /// The field identifier this column addresses.
    ///
    /// The data index wins over the key even when it is empty, in which case
    /// the column has no identifier at all.
    pub fn field_name(&self) -> Option<String> {
        let name = match (&self.data_index, &self.key) {
            (Some(data_index), _) => data_index.field_name(),
            (None, Some(key)) => key.to_string(),
            (None, None) => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    /// The title, when it is usable as a label.
    pub fn label(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

/// A column that nests other columns under a shared header.
///
/// A group may also carry its own key, data index and exporter. They are
/// resolved like a leaf's, after the children.
#[derive(Debug, Clone, Default)]
pub struct GroupColumn {
    /// The group's own attributes; `column.title` is the group header.
    pub column: LeafColumn,
    /// Nested columns, leaves or further groups.
    pub children: Vec<Column>,
}

impl GroupColumn {
    /// Creates a group over `children` with no attributes of its own.
    pub fn new<I, C>(children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Self {
            column: LeafColumn::new(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the group's own attributes.
    pub fn with_column(mut self, column: LeafColumn) -> Self {
        self.column = column;
        self
    }
}

/// A column descriptor.
#[derive(Debug, Clone)]
pub enum Column {
    Leaf(LeafColumn),
    Group(GroupColumn),
}

impl Column {
    /// Creates a leaf column reading `data_index`.
    pub fn data(data_index: impl Into<DataIndex>) -> LeafColumn {
        LeafColumn::new().data_index(data_index)
    }

    /// Creates a leaf column identified only by its key.
    pub fn keyed(key: impl Into<ColumnKey>) -> LeafColumn {
        LeafColumn::new().key(key)
    }

    /// Creates a group column.
    pub fn group<I, C>(title: impl Into<String>, children: I) -> Column
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Column::Group(GroupColumn::new(children).with_column(LeafColumn::new().title(title)))
    }

    /// Returns the column title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Column::Leaf(leaf) => leaf.title.as_deref(),
            Column::Group(group) => group.column.title.as_deref(),
        }
    }

    /// Returns the nested columns (empty for leaves).
    pub fn children(&self) -> &[Column] {
        match self {
            Column::Leaf(_) => &[],
            Column::Group(group) => &group.children,
        }
    }
}

impl From<LeafColumn> for Column {
    fn from(v: LeafColumn) -> Self {
        Column::Leaf(v)
    }
}

impl From<GroupColumn> for Column {
    fn from(v: GroupColumn) -> Self {
        Column::Group(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_from_path() {
        assert_eq!(
            Column::data(["contact", "name"]).field_name().as_deref(),
            Some("contact.name")
        );
        let mixed = DataIndex::Path(vec![ColumnKey::from("items"), ColumnKey::from(0)]);
        assert_eq!(mixed.field_name(), "items.0");
    }

    #[test]
    fn test_field_name_falls_back_to_key() {
        assert_eq!(Column::keyed("age").field_name().as_deref(), Some("age"));
        assert_eq!(Column::keyed(7).field_name().as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_data_index_has_no_field() {
        assert_eq!(Column::data("").key("age").field_name(), None);
        assert_eq!(Column::data(Vec::<ColumnKey>::new()).field_name(), None);
        assert_eq!(LeafColumn::new().title("Nothing").field_name(), None);
    }

    #[test]
    fn test_label_ignores_empty_title() {
        assert_eq!(Column::data("a").title("").label(), None);
        assert_eq!(Column::data("a").title("A").label(), Some("A"));
    }
}
