//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "formstate";
const APPLICATION: &str = "formstate";

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 10;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/formstate` or `~/.cache/formstate`
/// - macOS: `~/Library/Caches/dev.formstate.formstate`
/// - Windows: `C:\Users\<User>\AppData\Local\formstate\formstate\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive `latest.log` under a timestamped name and prune old archives.
///
/// Call this at startup before creating the new log file. Archives are
/// named `%Y%m%d_%H%M%S.log`, so name order is age order; only the newest
/// `MAX_OLD_LOGS` are kept.
pub fn rotate_logs(dir: &Path) {
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let archived = dir.join(format!("{}.log", timestamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("Failed to archive {}: {}", latest.display(), e);
        }
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(MAX_OLD_LOGS);
    for stale in &archives[..excess] {
        if let Err(e) = fs::remove_file(stale) {
            eprintln!("Failed to remove {}: {}", stale.display(), e);
        }
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

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
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs(dir.path());

        let names = names(dir.path());
        assert_eq!(names.len(), 1);
        assert_ne!(names[0], LATEST_LOG);
        assert!(names[0].ends_with(".log"));
    }

    #[test]
    fn test_rotate_prunes_oldest_archives() {
        let dir = TempDir::new().unwrap();
        for day in 1..=(MAX_OLD_LOGS + 2) {
            fs::write(dir.path().join(format!("200001{:02}_000000.log", day)), "").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        rotate_logs(dir.path());

        let names = names(dir.path());
        assert_eq!(names.len(), MAX_OLD_LOGS + 1);
        assert!(!names.contains(&"20000101_000000.log".to_string()));
        assert!(!names.contains(&"20000102_000000.log".to_string()));
        assert!(names.contains(&"20000103_000000.log".to_string()));
        assert!(names.contains(&"notes.txt".to_string()));
    }
}
