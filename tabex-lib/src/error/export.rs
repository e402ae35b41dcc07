//! Export error types

/// Errors raised while serializing or saving an export.
///
/// Building the export grid itself never fails; these cover the CSV writer,
/// the download sink and the export button's guards.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer or reader rejected the data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the exported file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The serialized bytes were not valid UTF-8.
    #[error("exported text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Delimiter and quote characters must be distinct single-byte ASCII.
    #[error("'{0}' cannot be used as a delimiter or quote character")]
    InvalidDelimiter(char),

    /// The column picker was confirmed with no column selected.
    #[error("Please select at least one column.")]
    NothingSelected,

    /// The export button is disabled.
    #[error("export is disabled")]
    Disabled,

    /// The table was not configured as exportable.
    #[error("table is not exportable")]
    NotExportable,
}
