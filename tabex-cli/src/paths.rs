//! Where tabex keeps its log and drops exports by default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

/// Log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Archived logs from earlier runs that survive a rotation.
pub const KEPT_LOGS: usize = 5;

/// Log directory: `~/.cache/tabex` on Linux, the platform cache dir elsewhere.
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "tabex", "tabex").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Where exports go when no output directory is given: the user's download
/// directory, else the current directory.
pub fn download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Prepares `dir` for a new run and returns the path of the fresh log file.
///
/// The previous `latest.log` is archived as `tabex-<timestamp>.log` and only
/// the newest `keep` archives are left.
pub fn rotate_logs(dir: &Path, keep: usize) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        fs::rename(&latest, dir.join(format!("tabex-{stamp}.log")))?;
    }

    // timestamped names sort oldest first
    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    archives.sort();
    let stale = archives.len().saturating_sub(keep);
    for path in &archives[..stale] {
        fs::remove_file(path)?;
    }

    Ok(latest)
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("tabex-") && name.ends_with(".log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "old run").unwrap();

        let latest = rotate_logs(dir.path(), KEPT_LOGS).unwrap();
        assert_eq!(latest, dir.path().join(LATEST_LOG));
        assert!(!latest.exists());

        let names = names(dir.path());
        assert_eq!(names.len(), 1);
        assert!(is_archive(&dir.path().join(&names[0])));
    }

    #[test]
    fn test_rotate_prunes_oldest_archives() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=4 {
            fs::write(dir.path().join(format!("tabex-2024010{day}_000000.000.log")), "").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        rotate_logs(dir.path(), 2).unwrap();
        assert_eq!(
            names(dir.path()),
            ["notes.txt", "tabex-20240103_000000.000.log", "tabex-20240104_000000.000.log"]
        );
    }

    #[test]
    fn test_rotate_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cache").join("tabex");
        let latest = rotate_logs(&nested, KEPT_LOGS).unwrap();
        assert!(nested.is_dir());
        assert_eq!(latest, nested.join(LATEST_LOG));
    }
}
