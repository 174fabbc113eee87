//! Path construction and traversal-safe resolution under the backup root.
//!
//! On-disk layout: `<root>/<device type>/<device address>/<file name>`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use confkeep_common::error::StorageError;

/// Concatenates the hierarchical backup path. Pure, no I/O.
pub fn build_path(root: &Path, device_type: &str, device_address: &str, file_name: &str) -> PathBuf {
    root.join(device_type).join(device_address).join(file_name)
}

/// `running-config_<YYYY-MM-DD>.txt`. One file per device per calendar day.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("running-config_{}.txt", date.format("%Y-%m-%d"))
}

/// Resolves a caller-supplied relative path against `root`.
///
/// The result is canonical (`.`/`..` and symlinks resolved) and is either
/// the canonical root or lies beneath it; anything else is rejected with
/// [`StorageError::PathTraversal`]. Absolute paths and `..` segments that
/// climb above the root are rejected before the filesystem is touched, so
/// the answer does not depend on what exists outside the root. Both `/` and
/// `\` are treated as separators.
///
/// A path that passes the checks but does not exist yields
/// [`StorageError::NotFound`].
pub fn resolve(root: &Path, relative_path: &str) -> Result<PathBuf, StorageError> {
    let normalized: String = relative_path.replace('\\', "/");
    let relative: &Path = Path::new(&normalized);
    ensure_stays_below_root(relative, relative_path)?;

    let canonical_root: PathBuf = canonicalize(root)?;
    let candidate: PathBuf = canonicalize(&root.join(relative))?;

    if candidate.starts_with(&canonical_root) {
        Ok(candidate)
    } else {
        Err(StorageError::PathTraversal(relative_path.to_string()))
    }
}

/// Creates the directory that will contain `path`. Existing directories are fine.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

fn ensure_stays_below_root(relative: &Path, raw: &str) -> Result<(), StorageError> {
    let mut depth: usize = 0;

    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| StorageError::PathTraversal(raw.to_string()))?;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversal(raw.to_string()));
            }
        }
    }
    Ok(())
}

fn canonicalize(path: &Path) -> Result<PathBuf, StorageError> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            StorageError::NotFound(path.to_path_buf())
        }
        _ => StorageError::Io(e),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
