//! FormatterError for named export formatters

/// Error type for looking up a built-in formatter by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatterError {
    /// No built-in formatter has this name.
    #[error("unknown formatter '{name}' (expected one of: {expected})")]
    Unknown { name: String, expected: String },
}

impl FormatterError {
    /// Creates a new unknown formatter error.
    pub fn unknown(name: impl Into<String>, expected: &[&str]) -> Self {
        Self::Unknown {
            name: name.into(),
            expected: expected.join(", "),
        }
    }
}
