//! # Error Taxonomy
//!
//! Every fallible operation in the workspace reports one of the enums below.
//! Callers that need to pick a recovery action (fix the input, choose another
//! backup, retry later) should go through [`ErrorKind`] instead of matching on
//! individual variants.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a failure, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected before any work started. Correct it and retry.
    Validation,
    /// The requested artifact does not exist (anymore).
    NotFound,
    /// A backend or resource failure. Input changes will not help.
    Operational,
}

#[derive(Error, Debug)]
pub enum SubnetError {
    #[error("Invalid subnet format: {0}")]
    InvalidFormat(String),

    #[error("Only IPv4 subnets are supported")]
    UnsupportedFamily,

    #[error("Subnet too large: {addresses} addresses, max {max}")]
    RangeTooLarge { addresses: u64, max: u64 },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Unable to create probe socket: {0}")]
    Socket(#[source] io::Error),

    #[error("Probe worker failed: {0}")]
    Worker(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Path escapes the backup root: {0}")]
    PathTraversal(String),

    #[error("Backup file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Backup storage error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Unable to connect to device: {0}")]
    Connect(String),

    #[error("Device command failed: {0}")]
    Command(String),

    #[error("Backup file has no configuration lines to restore")]
    EmptyConfig,
}

/// Failure of a discovery, backup or restore use case.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Subnet(#[from] SubnetError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Subnet(_) => ErrorKind::Validation,
            ServiceError::Storage(StorageError::PathTraversal(_)) => ErrorKind::Validation,
            ServiceError::Storage(StorageError::NotFound(_)) => ErrorKind::NotFound,
            ServiceError::Device(DeviceError::EmptyConfig) => ErrorKind::Validation,
            ServiceError::Storage(StorageError::Io(_))
            | ServiceError::Scan(_)
            | ServiceError::Device(_) => ErrorKind::Operational,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
