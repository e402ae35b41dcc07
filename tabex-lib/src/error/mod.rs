//! Error types

mod document;
mod export;
mod formatter;

pub use document::*;
pub use export::*;
pub use formatter::*;
