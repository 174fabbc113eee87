//! Runtime configuration: backup root, allowed origins and scan limits,
//! loaded from the environment and overridden by command-line flags.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKUP_ROOT: &str = "backups";
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Per-probe connect timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(350);
/// Number of hosts probed at the same time.
pub const PROBE_CONCURRENCY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub probe_timeout: Duration,
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_timeout: PROBE_TIMEOUT,
            concurrency: PROBE_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Top-level directory holding every backup artifact.
    pub backup_root: PathBuf,
    /// Cross-origin callers allowed by a web front end.
    pub allowed_origins: Vec<String>,
    pub scan: ScanConfig,
    /// Suppresses decorative output. Level 2 prints results only.
    pub quiet: u8,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_root: PathBuf::from(DEFAULT_BACKUP_ROOT),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            scan: ScanConfig::default(),
            quiet: 0,
            json: false,
        }
    }
}

impl Config {
    /// Loads `BACKUP_ROOT` and `FRONTEND_ORIGINS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(root) = lookup("BACKUP_ROOT").filter(|r| !r.trim().is_empty()) {
            cfg.backup_root = PathBuf::from(root);
        }

        if let Some(raw) = lookup("FRONTEND_ORIGINS") {
            let origins = parse_origins(&raw);
            if !origins.is_empty() {
                cfg.allowed_origins = origins;
            }
        }

        cfg
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
