//! Table document error types

/// Errors raised while loading a table document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not describe a table.
    #[error("invalid table document: {0}")]
    Json(#[from] serde_json::Error),
}
