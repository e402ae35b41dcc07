//! Column resolution
//!
//! Walks a column tree depth-first and flattens it into a [`FieldMap`]: the
//! ordered set of field identifiers a table searches and exports, each with a
//! plain label or an [`ExportDescriptor`].
//!
//! Resolution never fails. Columns without a usable field identifier are
//! skipped, and a later column with the same identifier replaces the earlier
//! entry while keeping its position.

use indexmap::IndexMap;
use indexmap::map::Iter;
use log::{debug, trace};
use serde::Deserialize;
use serde::Deserializer;

use crate::column::Column;
use crate::column::ExportDescriptor;
use crate::column::LeafColumn;
use crate::model::Record;
use crate::model::Value;
use crate::props::ExportableProps;

/// What a resolved field carries.
#[derive(Debug, Clone)]
pub enum FieldEntry {
    /// Plain label; exported cells are the raw row value.
    Label(String),
    /// Explicit export header and formatter.
    Export(ExportDescriptor),
}

impl FieldEntry {
    /// The header cell for this field.
    pub fn header(&self) -> &str {
        match self {
            FieldEntry::Label(label) => label,
            FieldEntry::Export(descriptor) => &descriptor.header,
        }
    }

    /// The exported value of `field` in `record`.
    pub fn export_value(&self, field: &str, record: &Record, index: usize) -> Value {
        match self {
            FieldEntry::Label(_) => record.get_path(field).cloned().unwrap_or_default(),
            FieldEntry::Export(descriptor) => descriptor.format(field, record, index),
        }
    }
}

impl From<ExportDescriptor> for FieldEntry {
    fn from(v: ExportDescriptor) -> Self {
        FieldEntry::Export(v)
    }
}

impl From<&str> for FieldEntry {
    fn from(v: &str) -> Self {
        FieldEntry::Label(v.to_string())
    }
}

impl From<String> for FieldEntry {
    fn from(v: String) -> Self {
        FieldEntry::Label(v)
    }
}

/// Ordered mapping from field identifier to [`FieldEntry`].
///
/// # Example
///
/// ```
/// use tabex_lib::column::Column;
/// use tabex_lib::resolve::{resolve, ResolveOptions};
///
/// let columns = vec![
///     Column::group("Name", [Column::data("first").title("First"), Column::data("last").title("Last")]),
///     Column::data(["contact", "phone"]).into(),
/// ];
///
/// let fields = resolve(&columns, ResolveOptions::default());
/// let ids: Vec<&str> = fields.keys().collect();
/// assert_eq!(ids, ["first", "last", "contact.phone"]);
/// assert_eq!(fields.get("contact.phone").unwrap().header(), "contact.phone");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: IndexMap<String, FieldEntry>,
}

impl FieldMap {
    /// Creates an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, entry: impl Into<FieldEntry>) {
        self.entries.insert(field.into(), entry.into());
    }

    /// Sets an entry (builder pattern).
    pub fn with(mut self, field: impl Into<String>, entry: impl Into<FieldEntry>) -> Self {
        self.insert(field, entry);
        self
    }

    /// Returns the entry for a field.
    pub fn get(&self, field: &str) -> Option<&FieldEntry> {
        self.entries.get(field)
    }

    /// Returns `true` if the field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Field identifiers in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in order.
    pub fn iter(&self) -> Iter<'_, String, FieldEntry> {
        self.entries.iter()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restricts `selected` to known fields, in this map's order.
    ///
    /// The caller's order and duplicates are irrelevant: the result always
    /// follows the order the columns were declared in.
    pub fn select<'a, I, S>(&self, selected: I) -> Vec<(&str, &FieldEntry)>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        let wanted: Vec<&str> = selected.into_iter().map(AsRef::as_ref).collect();
        self.entries
            .iter()
            .filter(|(field, _)| wanted.contains(&field.as_str()))
            .map(|(field, entry)| (field.as_str(), entry))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a FieldEntry);
    type IntoIter = Iter<'a, String, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, E: Into<FieldEntry>> FromIterator<(K, E)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut fields = FieldMap::new();
        for (field, entry) in iter {
            fields.insert(field, entry);
        }
        fields
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEntry {
            Label(String),
            Number(serde_json::Number),
            Export(ExportDescriptor),
        }

        let raw = IndexMap::<String, RawEntry>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(field, entry)| {
                let entry = match entry {
                    RawEntry::Label(label) => FieldEntry::Label(label),
                    RawEntry::Number(n) => FieldEntry::Label(n.to_string()),
                    RawEntry::Export(descriptor) => FieldEntry::Export(descriptor),
                };
                (field, entry)
            })
            .collect())
    }
}

/// Options for [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Include columns without an explicit exporter as plain labels.
    ///
    /// Default: true
    pub auto_pick_all_columns: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            auto_pick_all_columns: true,
        }
    }
}

impl ResolveOptions {
    /// Only resolve columns that declare an exporter.
    pub fn exporters_only() -> Self {
        Self {
            auto_pick_all_columns: false,
        }
    }
}

/// Flattens a column tree into a field map.
///
/// A group's children are resolved before the group's own key, data index
/// and exporter.
pub fn resolve(columns: &[Column], options: ResolveOptions) -> FieldMap {
    let mut fields = FieldMap::new();
    collect(columns, options, &mut fields);
    debug!(
        "resolved {} field(s) from {} top-level column(s)",
        fields.len(),
        columns.len()
    );
    fields
}

/// Every resolvable column, labelled; the fields a search looks at.
pub fn searchable_fields(columns: &[Column]) -> FieldMap {
    resolve(columns, ResolveOptions::default())
}

/// The fields an export offers: the explicit `fields` override when one is
/// configured, otherwise the columns resolved under the props' auto-pick
/// setting.
pub fn export_fields(columns: &[Column], props: &ExportableProps) -> FieldMap {
    if let Some(fields) = &props.fields {
        debug!("using {} configured export field(s)", fields.len());
        return fields.clone();
    }
    resolve(
        columns,
        ResolveOptions {
            auto_pick_all_columns: props.auto_pick_all_columns,
        },
    )
}

fn collect(columns: &[Column], options: ResolveOptions, fields: &mut FieldMap) {
    for column in columns {
        match column {
            Column::Group(group) => {
                collect(&group.children, options, fields);
                collect_leaf(&group.column, options, fields);
            }
            Column::Leaf(leaf) => collect_leaf(leaf, options, fields),
        }
    }
}

fn collect_leaf(leaf: &LeafColumn, options: ResolveOptions, fields: &mut FieldMap) {
    let Some(field) = leaf.field_name() else {
        trace!("skipping column {:?}: no field identifier", leaf.title);
        return;
    };
    let label = leaf.label().unwrap_or(&field).to_string();

    if let Some(exporter) = &leaf.exporter {
        trace!("field '{}' uses an exporter", field);
        fields.insert(field, exporter.to_descriptor(&label));
    } else if options.auto_pick_all_columns {
        fields.insert(field, label);
    } else {
        trace!("field '{}' has no exporter, not picked", field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Exporter;
    use crate::column::Formatter;

    #[test]
    fn test_label_falls_back_to_field() {
        let columns: Vec<Column> = vec![Column::data("phone").into(), Column::data("name").title("Name").into()];
        let fields = resolve(&columns, ResolveOptions::default());
        assert_eq!(fields.get("phone").unwrap().header(), "phone");
        assert_eq!(fields.get("name").unwrap().header(), "Name");
    }

    #[test]
    fn test_exporters_only() {
        let columns: Vec<Column> = vec![
            Column::data("name").title("Name").into(),
            Column::data("phone")
                .exporter(Exporter::Descriptor {
                    header: Some("Phone".into()),
                    formatter: Some(Formatter::builtin("trim").unwrap()),
                })
                .into(),
        ];
        let fields = resolve(&columns, ResolveOptions::exporters_only());
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["phone"]);
        assert_eq!(fields.get("phone").unwrap().header(), "Phone");
    }

    #[test]
    fn test_export_fields_prefers_override() {
        let columns: Vec<Column> = vec![Column::data("name").into()];
        let props = ExportableProps::default().with_fields(FieldMap::new().with("id", "ID"));
        assert_eq!(export_fields(&columns, &props).keys().collect::<Vec<_>>(), ["id"]);

        let props = ExportableProps::default().with_auto_pick_all_columns(false);
        assert!(export_fields(&columns, &props).is_empty());
    }

    #[test]
    fn test_select_follows_map_order() {
        let fields = FieldMap::new().with("a", "A").with("b", "B").with("c", "C");
        let picked: Vec<&str> = fields
            .select(["c", "a", "zzz", "a"].iter().copied())
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(picked, ["a", "c"]);
    }

    #[test]
    fn test_deserialize_field_override() {
        let fields: FieldMap = serde_json::from_str(
            r#"{"name": "Name", "age": 42, "phone": {"header": "Phone", "formatter": "trim"}, "note": {}}"#,
        )
        .unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["name", "age", "phone", "note"]);
        assert_eq!(fields.get("age").unwrap().header(), "42");
        assert_eq!(fields.get("phone").unwrap().header(), "Phone");
        assert_eq!(fields.get("note").unwrap().header(), "");
    }
}
