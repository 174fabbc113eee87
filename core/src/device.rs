//! # Device Session Port
//!
//! The boundary to whatever automation library actually logs into a switch
//! or router. The backup service depends only on [`DeviceSession`]; vendor
//! CLI handling lives behind it.

use std::fmt;

use async_trait::async_trait;
use confkeep_common::error::DeviceError;
use confkeep_common::network::host::Protocol;

const TELNET_SUFFIX: &str = "_telnet";

/// Connection parameters for one managed device.
#[derive(Clone)]
pub struct DeviceTarget {
    /// IP address or hostname.
    pub address: String,
    pub username: String,
    pub password: String,
    /// Automation driver name, e.g. `cisco_ios`.
    pub device_type: String,
    pub protocol: Protocol,
}

impl DeviceTarget {
    /// Driver name to hand to the automation library.
    ///
    /// Telnet drivers carry a `_telnet` suffix; it is appended unless the
    /// caller already supplied it.
    pub fn effective_device_type(&self) -> String {
        match self.protocol {
            Protocol::Telnet if !self.device_type.ends_with(TELNET_SUFFIX) => {
                format!("{}{TELNET_SUFFIX}", self.device_type)
            }
            _ => self.device_type.clone(),
        }
    }
}

impl fmt::Debug for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceTarget")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("device_type", &self.device_type)
            .field("protocol", &self.protocol)
            .finish()
    }
}

#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Output of `show running-config`.
    async fn fetch_running_config(&self, target: &DeviceTarget) -> Result<String, DeviceError>;

    /// Pushes configuration lines and saves them on the device.
    async fn apply_config(&self, target: &DeviceTarget, lines: &[String]) -> Result<(), DeviceError>;
}

/// Extracts the lines worth replaying from a stored running-config.
///
/// Blank lines and `!` comment lines are dropped.
pub fn restore_lines(config_text: &str) -> Result<Vec<String>, DeviceError> {
    let lines: Vec<String> = config_text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('!')
        })
        .map(String::from)
        .collect();

    if lines.is_empty() {
        return Err(DeviceError::EmptyConfig);
    }
    Ok(lines)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
