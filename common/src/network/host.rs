//! # Discovered Host Model
//!
//! A host only becomes a [`ScanResult`] once at least one management port
//! answered. Hosts with nothing open are never represented.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Management protocols probed during discovery, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Ssh,
    Telnet,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Ssh, Protocol::Telnet];

    pub fn port(self) -> u16 {
        match self {
            Protocol::Ssh => 22,
            Protocol::Telnet => 23,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Ssh => "ssh",
            Protocol::Telnet => "telnet",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssh" => Ok(Protocol::Ssh),
            "telnet" => Ok(Protocol::Telnet),
            other => Err(format!("unsupported protocol: {other}")),
        }
    }
}

/// A host with at least one open management port.
///
/// `open_ports` and `protocols` correspond 1:1 and always follow
/// [`Protocol::ALL`] order: ssh/22 before telnet/23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub ip: Ipv4Addr,
    pub open_ports: Vec<u16>,
    pub protocols: Vec<Protocol>,
}

impl ScanResult {
    /// Returns `None` when no protocol was found open.
    pub fn from_open(ip: Ipv4Addr, open: &[Protocol]) -> Option<Self> {
        let protocols: Vec<Protocol> = Protocol::ALL
            .into_iter()
            .filter(|protocol| open.contains(protocol))
            .collect();

        if protocols.is_empty() {
            return None;
        }

        Some(Self {
            ip,
            open_ports: protocols.iter().map(|p| p.port()).collect(),
            protocols,
        })
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
