//! Deserialization of column descriptors.
//!
//! Columns use the table component's JSON shape: an object with `children`
//! is a group, anything else is a leaf. Titles may be strings or numbers;
//! other title shapes are treated as absent. Unknown keys such as `width`
//! are ignored.

use serde::Deserialize;
use serde::Deserializer;

use super::Column;
use super::ColumnKey;
use super::DataIndex;
use super::Exporter;
use super::GroupColumn;
use super::LeafColumn;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumn {
    #[serde(default)]
    title: Option<serde_json::Value>,
    #[serde(default)]
    key: Option<ColumnKey>,
    #[serde(default)]
    data_index: Option<DataIndex>,
    #[serde(default)]
    exporter: Option<Exporter>,
    #[serde(default)]
    children: Option<Vec<Column>>,
}

fn title_text(title: Option<serde_json::Value>) -> Option<String> {
    match title? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawColumn::deserialize(deserializer)?;
        let column = LeafColumn {
            title: title_text(raw.title),
            key: raw.key,
            data_index: raw.data_index,
            exporter: raw.exporter,
        };

        Ok(match raw.children {
            Some(children) => Column::Group(GroupColumn { column, children }),
            None => Column::Leaf(column),
        })
    }
}

impl<'de> Deserialize<'de> for ColumnKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawKey {
            Text(String),
            Number(i64),
        }

        Ok(match RawKey::deserialize(deserializer)? {
            RawKey::Text(s) => ColumnKey::Text(s),
            RawKey::Number(n) => ColumnKey::Number(n),
        })
    }
}

impl<'de> Deserialize<'de> for DataIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawIndex {
            Name(String),
            Number(i64),
            Path(Vec<ColumnKey>),
        }

        Ok(match RawIndex::deserialize(deserializer)? {
            RawIndex::Name(name) => DataIndex::Name(name),
            RawIndex::Number(n) => DataIndex::Name(n.to_string()),
            RawIndex::Path(segments) => DataIndex::Path(segments),
        })
    }
}
