pub mod backups;
pub mod discover;
pub mod info;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "confkeep")]
#[command(about = "Find network devices and browse their configuration backups.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Backup root directory (overrides BACKUP_ROOT)
    #[arg(long, global = true)]
    pub backup_root: Option<PathBuf>,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Reduce decorative output (-qq prints results only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the effective configuration
    #[command(alias = "i")]
    Info,
    /// Discover hosts with SSH or Telnet open in an IPv4 subnet
    #[command(alias = "d")]
    Discover {
        /// CIDR block, e.g. 192.168.1.0/24 (at most 4096 addresses)
        subnet: String,
    },
    /// List stored configuration backups
    #[command(alias = "b")]
    Backups,
    /// Print a stored backup
    #[command(alias = "s")]
    Show {
        /// Path relative to the backup root, as printed by `backups`
        path: String,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
