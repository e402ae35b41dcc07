//! Export formatting for columns

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Deserializer;
use serde::de;

use crate::error::FormatterError;
use crate::model::Record;
use crate::model::Value;

/// Signature of a cell formatter: the value at the column's field (if any),
/// the whole row and the row's index in the exported set.
pub type FormatFn = dyn Fn(Option<&Value>, &Record, usize) -> Value + Send + Sync;

/// A shareable cell formatter used during export.
///
/// # Example
///
/// ```
/// use tabex_lib::column::Formatter;
/// use tabex_lib::model::{Record, Value};
///
/// let upper = Formatter::builtin("upper").unwrap();
/// let row = Record::new().set("name", "bob");
/// assert_eq!(upper.format(row.get("name"), &row, 0), Value::from("BOB"));
///
/// let numbered = Formatter::new(|value, _, index| {
///     Value::from(format!("{}: {}", index + 1, value.map(Value::to_text).unwrap_or_default()))
/// });
/// assert_eq!(numbered.format(row.get("name"), &row, 0), Value::from("1: bob"));
/// ```
#[derive(Clone)]
pub struct Formatter {
    name: Option<&'static str>,
    func: Arc<FormatFn>,
}

impl Formatter {
    /// Names accepted by [`Formatter::builtin`].
    pub const BUILTINS: &'static [&'static str] = &["upper", "lower", "trim", "string", "json"];

    /// Wraps a closure as a formatter.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Option<&Value>, &Record, usize) -> Value + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    fn named<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(Option<&Value>, &Record, usize) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Some(name),
            func: Arc::new(func),
        }
    }

    /// Looks up a built-in formatter by name.
    ///
    /// - `upper` / `lower` / `trim` transform the cell text
    /// - `string` writes the cell text unchanged
    /// - `json` writes the value as JSON, `null` included
    ///
    /// All of them except `json` leave missing and null values empty.
    pub fn builtin(name: &str) -> Result<Self, FormatterError> {
        let (name, text): (&'static str, fn(&Value) -> String) = match name {
            "upper" => ("upper", |v| v.to_text().to_uppercase()),
            "lower" => ("lower", |v| v.to_text().to_lowercase()),
            "trim" => ("trim", |v| v.to_text().trim().to_string()),
            "string" => ("string", Value::to_text),
            "json" => {
                return Ok(Self::named("json", |value, _, _| {
                    let json = serde_json::to_string(value.unwrap_or(&Value::Null));
                    Value::String(json.unwrap_or_default())
                }));
            }
            other => return Err(FormatterError::unknown(other, Self::BUILTINS)),
        };

        Ok(Self::named(name, move |value, _, _| match value {
            None | Some(Value::Null) => Value::Null,
            Some(v) => Value::String(text(v)),
        }))
    }

    /// Formats one cell.
    pub fn format(&self, value: Option<&Value>, record: &Record, index: usize) -> Value {
        (self.func)(value, record, index)
    }

    /// The built-in name, if this formatter is one.
    pub fn name(&self) -> Option<&str> {
        self.name
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "Formatter({})", name),
            None => f.write_str("Formatter(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for Formatter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Formatter::builtin(&name).map_err(de::Error::custom)
    }
}

/// How a column is exported: a bare formatter, or a descriptor that may
/// override the header.
#[derive(Debug, Clone)]
pub enum Exporter {
    /// Format cells with this function; the header is the column's title.
    Formatter(Formatter),
    /// Explicit header and/or formatter.
    Descriptor {
        header: Option<String>,
        formatter: Option<Formatter>,
    },
}

impl Exporter {
    /// Normalizes to an [`ExportDescriptor`], using `default_header` when
    /// no header is given.
    pub fn to_descriptor(&self, default_header: &str) -> ExportDescriptor {
        match self {
            Exporter::Formatter(formatter) => ExportDescriptor {
                header: default_header.to_string(),
                formatter: Some(formatter.clone()),
            },
            Exporter::Descriptor { header, formatter } => ExportDescriptor {
                header: header.clone().unwrap_or_else(|| default_header.to_string()),
                formatter: formatter.clone(),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Exporter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawExporter {
            Name(String),
            Descriptor {
                #[serde(default)]
                header: Option<String>,
                #[serde(default)]
                formatter: Option<String>,
            },
        }

        let builtin = |name: &str| -> Result<Formatter, D::Error> {
            Formatter::builtin(name).map_err(de::Error::custom)
        };
        match RawExporter::deserialize(deserializer)? {
            RawExporter::Name(name) => Ok(Exporter::Formatter(builtin(&name)?)),
            RawExporter::Descriptor { header, formatter } => Ok(Exporter::Descriptor {
                header,
                formatter: formatter.as_deref().map(builtin).transpose()?,
            }),
        }
    }
}

/// Resolved export settings for one field: its header cell and an optional
/// formatter. A descriptor without a formatter exports empty cells.
#[derive(Debug, Clone)]
pub struct ExportDescriptor {
    pub header: String,
    pub formatter: Option<Formatter>,
}

impl ExportDescriptor {
    /// Creates a descriptor with a header and no formatter.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            formatter: None,
        }
    }

    /// Sets the formatter.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Formats the cell for `field` in `record`.
    pub fn format(&self, field: &str, record: &Record, index: usize) -> Value {
        match &self.formatter {
            Some(formatter) => formatter.format(record.get_path(field), record, index),
            None => Value::Null,
        }
    }
}

impl<'de> Deserialize<'de> for ExportDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawDescriptor {
            #[serde(default)]
            header: String,
            #[serde(default)]
            formatter: Option<Formatter>,
        }

        let raw = RawDescriptor::deserialize(deserializer)?;
        Ok(ExportDescriptor {
            header: raw.header,
            formatter: raw.formatter,
        })
    }
}
