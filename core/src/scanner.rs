//! Bounded-concurrency discovery of management-capable hosts.
//!
//! Every usable host of a [`Network`] is probed on each [`Protocol`] port.
//! At most `concurrency` hosts are in flight at any time; a host task holds
//! its slot while probing its ports one after the other, so the number of
//! simultaneously open connection attempts never exceeds the slot count.
//!
//! A refused or timed-out port only affects that port. The only failure that
//! aborts a scan is [`ScanError`], raised when probe sockets can no longer be
//! created.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use confkeep_common::config::ScanConfig;
use confkeep_common::error::ScanError;
use confkeep_common::network::host::{Protocol, ScanResult};
use confkeep_common::network::range::Network;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info};

use crate::network::tcp::TcpProbe;

/// Decides whether a single TCP port answers.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// `Ok(false)` for refused, unreachable or timed-out ports.
    async fn is_open(&self, addr: SocketAddrV4) -> Result<bool, ScanError>;
}

type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

pub struct PortScanner<P: Probe = TcpProbe> {
    probe: Arc<P>,
    concurrency: usize,
    on_host_probed: Option<ProgressCallback>,
}

impl PortScanner<TcpProbe> {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self::with_probe(TcpProbe::new(cfg.probe_timeout), cfg.concurrency)
    }
}

impl<P: Probe> PortScanner<P> {
    pub fn with_probe(probe: P, concurrency: usize) -> Self {
        Self {
            probe: Arc::new(probe),
            concurrency: concurrency.max(1),
            on_host_probed: None,
        }
    }

    /// Registers a callback receiving the running count of fully probed hosts.
    pub fn on_host_probed<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_host_probed = Some(Arc::new(callback));
        self
    }

    /// Scans `network` and returns the responsive hosts in ascending address order.
    pub async fn scan(&self, network: &Network) -> Result<Vec<ScanResult>, ScanError> {
        info!("Probing {} hosts in {network}", network.host_count());

        let slots = Arc::new(Semaphore::new(self.concurrency));
        let probed = Arc::new(AtomicUsize::new(0));
        let mut tasks: JoinSet<Result<Option<ScanResult>, ScanError>> = JoinSet::new();
        let mut results: Vec<ScanResult> = Vec::new();

        for host in network.hosts() {
            let permit = slots
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| ScanError::Worker(e.to_string()))?;

            let probe = self.probe.clone();
            let probed = probed.clone();
            let callback = self.on_host_probed.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let result = probe_host(probe.as_ref(), host).await;
                let count = probed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(cb) = callback {
                    cb(count);
                }
                result
            });

            while let Some(joined) = tasks.try_join_next() {
                collect(joined, &mut results)?;
            }
        }

        while let Some(joined) = tasks.join_next().await {
            collect(joined, &mut results)?;
        }

        results.sort_by_key(|result| result.ip);
        info!("{} of {} hosts expose a management port", results.len(), network.host_count());
        Ok(results)
    }
}

async fn probe_host<P: Probe>(probe: &P, host: Ipv4Addr) -> Result<Option<ScanResult>, ScanError> {
    let mut open: Vec<Protocol> = Vec::new();

    for protocol in Protocol::ALL {
        if probe.is_open(SocketAddrV4::new(host, protocol.port())).await? {
            open.push(protocol);
        }
    }

    let result = ScanResult::from_open(host, &open);
    if let Some(found) = &result {
        debug!("{host} answers on {:?}", found.open_ports);
    }
    Ok(result)
}

fn collect(
    joined: Result<Result<Option<ScanResult>, ScanError>, JoinError>,
    results: &mut Vec<ScanResult>,
) -> Result<(), ScanError> {
    let outcome = joined.map_err(|e| ScanError::Worker(e.to_string()))?;
    if let Some(found) = outcome? {
        results.push(found);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
