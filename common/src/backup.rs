//! Metadata for stored configuration backups.

use serde::{Serialize, Serializer};

/// One backup artifact found under the backup root.
///
/// Derived on demand from the filesystem and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRecord {
    /// Relative to the backup root, `/` separated on every platform.
    pub path: String,
    pub name: String,
    /// Seconds since the Unix epoch, sent as a string on the wire.
    #[serde(serialize_with = "as_string")]
    pub modified: u64,
}

fn as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Outcome of a backup or restore use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupOutcome {
    pub device: String,
    /// Relative path of the backup file involved.
    pub file: String,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
