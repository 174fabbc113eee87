//! # Backup Store
//!
//! Hierarchical, traversal-safe storage of running-config snapshots.
//!
//! * [`paths`]: path construction and the resolution safety boundary.
//! * [`catalog`]: enumeration of stored backups.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use confkeep_common::backup::BackupRecord;
use confkeep_common::error::StorageError;
use tracing::debug;

pub mod catalog;
pub mod paths;

/// A backup tree rooted at one directory.
#[derive(Debug, Clone)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, device_type: &str, device_address: &str, date: NaiveDate) -> PathBuf {
        paths::build_path(&self.root, device_type, device_address, &paths::backup_file_name(date))
    }

    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        paths::resolve(&self.root, relative_path)
    }

    pub fn list(&self) -> Result<Vec<BackupRecord>, StorageError> {
        catalog::list(&self.root)
    }

    /// Writes `content` as the backup of `date` and returns its relative path.
    ///
    /// A backup taken earlier the same day is overwritten. `device_type` and
    /// `device_address` must each be a single plain path segment.
    pub fn save(
        &self,
        device_type: &str,
        device_address: &str,
        date: NaiveDate,
        content: &str,
    ) -> Result<String, StorageError> {
        single_segment(device_type)?;
        single_segment(device_address)?;

        let path = self.path_for(device_type, device_address, date);
        paths::ensure_parent(&path)?;
        fs::write(&path, content)?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(format!(
            "{device_type}/{device_address}/{}",
            paths::backup_file_name(date)
        ))
    }

    /// Reads a backup previously returned by [`BackupStore::list`] or [`BackupStore::save`].
    pub fn read(&self, relative_path: &str) -> Result<String, StorageError> {
        let path = self.resolve(relative_path)?;
        if !path.is_file() {
            return Err(StorageError::NotFound(path));
        }
        Ok(fs::read_to_string(&path)?)
    }
}

fn single_segment(segment: &str) -> Result<(), StorageError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !segment.contains('\\') => Ok(()),
        _ => Err(StorageError::PathTraversal(segment.to_string())),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
