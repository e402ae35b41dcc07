//! Download targets for exported files.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::ExportError;

/// Base name used when no file name is configured.
pub const DEFAULT_FILE_NAME: &str = "table";

/// Returns `<base>.csv`, falling back to `table.csv` for a missing or empty
/// base.
///
/// ```
/// use tabex_lib::export::csv_file_name;
///
/// assert_eq!(csv_file_name(Some("people")), "people.csv");
/// assert_eq!(csv_file_name(None), "table.csv");
/// ```
pub fn csv_file_name(base: Option<&str>) -> String {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_FILE_NAME);
    format!("{}.csv", base)
}

/// Somewhere an exported file can be delivered.
pub trait DownloadSink {
    /// Saves `contents` as `file_name` and returns where it went.
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes downloads into a directory, creating it if needed. Existing files
/// with the same name are replaced.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents)?;
        info!("saved {} byte(s) to {}", contents.len(), path.display());
        Ok(path)
    }
}

/// Keeps downloads in memory, in the order they were saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    downloads: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every saved file as `(file name, contents)`.
    pub fn downloads(&self) -> &[(String, Vec<u8>)] {
        &self.downloads
    }

    /// The most recent download.
    pub fn last(&self) -> Option<(&str, &[u8])> {
        self.downloads
            .last()
            .map(|(name, contents)| (name.as_str(), contents.as_slice()))
    }

    /// The most recent download as text, if it is valid UTF-8.
    pub fn last_text(&self) -> Option<&str> {
        self.last().and_then(|(_, contents)| std::str::from_utf8(contents).ok())
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        self.downloads.push((file_name.to_string(), contents.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
