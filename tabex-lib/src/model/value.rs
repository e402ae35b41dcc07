//! Value enum for dynamic cell values

use std::borrow::Cow;

use super::Record;

/// A dynamic value stored in a row field.
///
/// Rows carry no schema, so every field holds one of these. Nested objects
/// become [`Value::Record`] and are addressed through dotted paths with
/// [`Record::get_path`].
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Record` |
///
/// # Example
///
/// ```
/// use tabex_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let visits = Value::from(12);
/// let empty = Value::Null;
///
/// assert_eq!(visits.to_text(), "12");
/// assert_eq!(empty.to_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested record.
    Record(Box<Record>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested record if this is a record value.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Text a search query is matched against.
    ///
    /// Only scalar values have a meaningful text form. Nulls, lists and nested
    /// records return `None` and never match a query.
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Int(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Null | Value::List(_) | Value::Record(_) => None,
        }
    }

    /// Text written into an exported cell.
    ///
    /// Null becomes an empty cell; lists and records are written as compact
    /// JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::List(_) | Value::Record(_) => serde_json::to_string(self).unwrap_or_default(),
            scalar => scalar.search_text().map(Cow::into_owned).unwrap_or_default(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Record(Box::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_of_scalars() {
        assert_eq!(Value::from("Lee").search_text().as_deref(), Some("Lee"));
        assert_eq!(Value::from(12345).search_text().as_deref(), Some("12345"));
        assert_eq!(Value::from(0.5).search_text().as_deref(), Some("0.5"));
        assert_eq!(Value::from(true).search_text().as_deref(), Some("true"));
    }

    #[test]
    fn test_non_scalars_have_no_search_text() {
        assert!(Value::Null.search_text().is_none());
        assert!(Value::List(vec![Value::from(1)]).search_text().is_none());
        assert!(Value::from(Record::new().set("name", "x")).search_text().is_none());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::from(2.0).to_text(), "2");
        assert_eq!(
            Value::from(Record::new().set("name", "pikachu")).to_text(),
            r#"{"name":"pikachu"}"#
        );
        assert_eq!(Value::from(vec![Value::from(1), Value::Null]).to_text(), "[1,null]");
    }

    #[test]
    fn test_default_is_null() {
        assert_eq!(Value::default(), Value::Null);
        assert_eq!(Record::new().get_path("missing").cloned().unwrap_or_default(), Value::Null);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(serde_json::json!({"a": [1, 2.5, "x"], "b": null}));
        let record = value.as_record().unwrap();
        assert_eq!(
            record.get("a"),
            Some(&Value::List(vec![Value::Int(1), Value::Float(2.5), Value::from("x")]))
        );
        assert_eq!(record.get("b"), Some(&Value::Null));
    }
}
