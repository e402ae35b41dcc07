//! Searchable and exportable tables
//!
//! Client-side search and CSV export over a tree of column descriptors and a
//! set of schemaless rows. Rows and columns stay owned by the caller; this
//! crate derives field maps from them, filters rows by a free-text query and
//! serializes selected columns to delimited text.

pub mod column;
pub mod document;
pub mod error;
pub mod export;
pub mod model;
pub mod picker;
pub mod props;
pub mod resolve;
pub mod search;

mod table;

pub use table::*;
