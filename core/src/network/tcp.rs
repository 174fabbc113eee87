//! TCP connect probing.

use std::net::{SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use confkeep_common::error::ScanError;
use tokio::net::TcpSocket;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::Probe;

/// Full TCP handshake probe.
///
/// Refusals, unreachable hosts and timeouts all count as closed. Only a
/// failure to create the socket itself is reported as an error, since that
/// means the process ran out of descriptors or buffers.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    connect_timeout: Duration,
}

impl TcpProbe {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn is_open(&self, addr: SocketAddrV4) -> Result<bool, ScanError> {
        let socket: TcpSocket = TcpSocket::new_v4().map_err(ScanError::Socket)?;

        match timeout(self.connect_timeout, socket.connect(SocketAddr::V4(addr))).await {
            Ok(Ok(_stream)) => Ok(true),
            Ok(Err(e)) => {
                trace!("{addr} closed: {e}");
                Ok(false)
            }
            Err(_elapsed) => {
                trace!("{addr} timed out");
                Ok(false)
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
