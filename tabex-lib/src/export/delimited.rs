//! Delimited-text serialization of export grids.

use csv::QuoteStyle;
use csv::ReaderBuilder;
use csv::Terminator;
use csv::WriterBuilder;
use serde::Deserialize;

use crate::error::ExportError;

use super::ExportGrid;

/// Which rows are dropped while serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipEmptyLines {
    /// Keep every row.
    Never,
    /// Drop rows whose cells are all empty.
    Empty,
    /// Drop rows whose cells are all empty or whitespace.
    #[default]
    Greedy,
}

impl SkipEmptyLines {
    /// Returns `true` if `row` should be dropped.
    pub fn skips<S: AsRef<str>>(self, row: &[S]) -> bool {
        match self {
            SkipEmptyLines::Never => false,
            SkipEmptyLines::Empty => row.iter().all(|cell| cell.as_ref().is_empty()),
            SkipEmptyLines::Greedy => row.iter().all(|cell| cell.as_ref().trim().is_empty()),
        }
    }
}

/// Line terminator between rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Newline {
    #[default]
    #[serde(rename = "\r\n")]
    CrLf,
    #[serde(rename = "\n")]
    Lf,
}

impl Newline {
    fn as_str(self) -> &'static str {
        match self {
            Newline::CrLf => "\r\n",
            Newline::Lf => "\n",
        }
    }

    fn terminator(self) -> Terminator {
        match self {
            Newline::CrLf => Terminator::CRLF,
            Newline::Lf => Terminator::Any(b'\n'),
        }
    }
}

/// Settings passed through to the CSV writer.
///
/// # Example
///
/// ```
/// use tabex_lib::export::{CsvOptions, Newline};
///
/// let options = CsvOptions::default()
///     .with_delimiter(';')
///     .with_newline(Newline::Lf);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvOptions {
    /// Field delimiter.
    ///
    /// Default: `,`
    pub delimiter: char,

    /// Quote character.
    ///
    /// Default: `"`
    pub quote: char,

    /// Quote every cell instead of only those that need it.
    ///
    /// Default: false
    pub quote_all: bool,

    /// Write the header row.
    ///
    /// Default: true
    pub header: bool,

    /// Line terminator.
    ///
    /// Default: CRLF
    pub newline: Newline,

    /// Row skipping policy.
    ///
    /// Default: greedy
    pub skip_empty_lines: SkipEmptyLines,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            quote_all: false,
            header: true,
            newline: Newline::CrLf,
            skip_empty_lines: SkipEmptyLines::Greedy,
        }
    }
}

impl CsvOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Quotes every cell.
    pub fn with_quote_all(mut self, quote_all: bool) -> Self {
        self.quote_all = quote_all;
        self
    }

    /// Includes or omits the header row.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Sets the line terminator.
    pub fn with_newline(mut self, newline: Newline) -> Self {
        self.newline = newline;
        self
    }

    /// Sets the row skipping policy.
    pub fn with_skip_empty_lines(mut self, skip: SkipEmptyLines) -> Self {
        self.skip_empty_lines = skip;
        self
    }

    fn delimiter_byte(&self) -> Result<u8, ExportError> {
        if self.delimiter == self.quote {
            return Err(ExportError::InvalidDelimiter(self.delimiter));
        }
        ascii_byte(self.delimiter)
    }

    fn quote_byte(&self) -> Result<u8, ExportError> {
        ascii_byte(self.quote)
    }
}

fn ascii_byte(c: char) -> Result<u8, ExportError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ExportError::InvalidDelimiter(c))
    }
}

/// Serializes a grid to delimited text.
///
/// Cells containing the delimiter, the quote character or a line break are
/// quoted, with embedded quotes doubled. No terminator follows the last row,
/// and an empty grid serializes to an empty string.
///
/// # Example
///
/// ```
/// use tabex_lib::export::{serialize, CsvOptions, ExportGrid};
///
/// let grid = ExportGrid::new(
///     vec!["Name".into(), "Note".into()],
///     vec![vec!["Ann".into(), "says \"hi\", twice".into()]],
/// );
/// let text = serialize(&grid, &CsvOptions::default()).unwrap();
/// assert_eq!(text, "Name,Note\r\nAnn,\"says \"\"hi\"\", twice\"");
/// ```
pub fn serialize(grid: &ExportGrid, options: &CsvOptions) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .quote(options.quote_byte()?)
        .quote_style(if options.quote_all {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        })
        .terminator(options.newline.terminator())
        .flexible(true)
        .from_writer(Vec::new());

    let header = (options.header && !grid.is_empty()).then_some(&grid.header);
    for row in header.into_iter().chain(grid.records.iter()) {
        if options.skip_empty_lines.skips(row) {
            continue;
        }
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with(options.newline.as_str()) {
        text.truncate(text.len() - options.newline.as_str().len());
    }
    Ok(text)
}

/// Parses delimited text back into rows of cells.
///
/// Uses the same delimiter and quote convention as [`serialize`]. Blank
/// lines are ignored and rows may differ in length.
pub fn parse(text: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>, ExportError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .quote(options.quote_byte()?)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
