//! # Network Discovery Service
//!
//! Implements the "find manageable devices" use case: validate the subnet,
//! fan out the port probes, and narrate progress on the event stream.

use confkeep_common::error::ServiceResult;
use confkeep_common::network::host::ScanResult;
use confkeep_common::network::subnet;
use tracing::warn;

use crate::events::LogBroadcaster;
use crate::network::tcp::TcpProbe;
use crate::scanner::{PortScanner, Probe};

pub struct DiscoveryService<P: Probe = TcpProbe> {
    scanner: PortScanner<P>,
    events: LogBroadcaster,
}

impl<P: Probe> DiscoveryService<P> {
    pub fn new(scanner: PortScanner<P>, events: LogBroadcaster) -> Self {
        Self { scanner, events }
    }

    /// Scans `subnet` for hosts answering on a management port.
    ///
    /// Invalid subnets are rejected before any event is published or any
    /// probe is sent.
    pub async fn discover(&self, subnet: &str) -> ServiceResult<Vec<ScanResult>> {
        let network = subnet::validate(subnet)?;
        self.events.publish(format!("Discovery started for {network}"));

        match self.scanner.scan(&network).await {
            Ok(devices) => {
                self.events.publish(format!(
                    "Discovery finished for {network}: {} device(s) found",
                    devices.len()
                ));
                Ok(devices)
            }
            Err(e) => {
                warn!("Discovery of {network} failed: {e}");
                self.events.publish_error(format!("Discovery failed for {network}: {e}"));
                Err(e.into())
            }
        }
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
