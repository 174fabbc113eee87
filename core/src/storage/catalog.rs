//! Enumeration of stored backups.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use confkeep_common::backup::BackupRecord;
use confkeep_common::error::StorageError;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const BACKUP_EXTENSION: &str = "txt";

/// Lists every `.txt` backup under `root`, sorted by relative path.
///
/// A missing root is an empty store, not an error. Symlinks are not followed,
/// so every record points at a regular file inside the root.
pub fn list(root: &Path) -> Result<Vec<BackupRecord>, StorageError> {
    if !root.exists() {
        debug!("Backup root {} does not exist yet", root.display());
        return Ok(Vec::new());
    }

    let mut found: Vec<(PathBuf, BackupRecord)> = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry: DirEntry = match entry {
            Ok(entry) => entry,
            Err(e) if vanished(e.io_error()) => continue,
            Err(e) => return Err(StorageError::Io(io::Error::from(e))),
        };

        if !is_backup_file(&entry) {
            continue;
        }

        let Some(record) = to_record(root, &entry)? else {
            continue;
        };
        found.push(record);
    }

    found.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(found.into_iter().map(|(_, record)| record).collect())
}

fn is_backup_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(BACKUP_EXTENSION))
}

/// `None` when the file disappeared between walking and reading metadata.
fn to_record(root: &Path, entry: &DirEntry) -> Result<Option<(PathBuf, BackupRecord)>, StorageError> {
    let metadata = match entry.metadata() {
        Ok(metadata) => metadata,
        Err(e) if vanished(e.io_error()) => return Ok(None),
        Err(e) => return Err(StorageError::Io(io::Error::from(e))),
    };

    let modified: u64 = metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    let relative: PathBuf = match entry.path().strip_prefix(root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => return Ok(None),
    };

    let record = BackupRecord {
        path: forward_slashed(&relative),
        name: entry.file_name().to_string_lossy().into_owned(),
        modified,
    };
    Ok(Some((relative, record)))
}

fn forward_slashed(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn vanished(error: Option<&io::Error>) -> bool {
    error.is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let records = list(&dir.path().join("never-created")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn lists_only_txt_files_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "juniper/10.0.0.9/running-config_2024-02-01.txt", "a");
        write(dir.path(), "cisco_ios/10.1.1.2/running-config_2024-01-01.txt", "b");
        write(dir.path(), "cisco_ios/10.1.1.1/running-config_2024-01-02.txt", "c");
        write(dir.path(), "cisco_ios/10.1.1.1/running-config_2024-01-01.txt", "d");
        write(dir.path(), "cisco_ios/10.1.1.1/notes.md", "ignored");
        fs::create_dir_all(dir.path().join("empty/dir.txt")).unwrap();

        let paths: Vec<String> = list(dir.path()).unwrap().into_iter().map(|r| r.path).collect();

        assert_eq!(
            paths,
            vec![
                "cisco_ios/10.1.1.1/running-config_2024-01-01.txt",
                "cisco_ios/10.1.1.1/running-config_2024-01-02.txt",
                "cisco_ios/10.1.1.2/running-config_2024-01-01.txt",
                "juniper/10.0.0.9/running-config_2024-02-01.txt",
            ]
        );
    }

    #[test]
    fn record_carries_name_and_whole_second_mtime() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cisco_ios/10.1.1.1/running-config_2024-01-01.txt", "x");

        let records = list(dir.path()).unwrap();
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "running-config_2024-01-01.txt");
        assert!(records[0].modified <= now);
        assert!(now - records[0].modified < 60);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_not_listed() {
        let outside = TempDir::new().unwrap();
        write(outside.path(), "secret.txt", "nope");

        let dir = TempDir::new().unwrap();
        write(dir.path(), "cisco_ios/10.1.1.1/running-config_2024-01-01.txt", "x");
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked-dir")).unwrap();

        let records = list(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
    }
}
