use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use confkeep_common::error::ErrorKind;
use confkeep_common::network::host::Protocol;
use confkeep_core::discovery::DiscoveryService;
use confkeep_core::events::LogBroadcaster;
use confkeep_core::network::tcp::TcpProbe;
use confkeep_core::scanner::{PortScanner, Probe};
use tokio::net::TcpListener;

use crate::fixtures::{FakeNetwork, listening, queued};

#[tokio::test]
async fn discovery_finds_ssh_device_in_small_subnet() {
    let events = LogBroadcaster::new();
    let mut sub = listening(&events).await;
    let network = FakeNetwork::default().with_open("192.168.1.1:22");
    let service = DiscoveryService::new(PortScanner::with_probe(network, 128), events.clone());

    let devices = service.discover("192.168.1.0/30").await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(devices[0].open_ports, vec![22]);
    assert_eq!(devices[0].protocols, vec![Protocol::Ssh]);
    assert_eq!(
        queued(&mut sub),
        vec![
            "Discovery started for 192.168.1.0/30",
            "Discovery finished for 192.168.1.0/30: 1 device(s) found",
        ]
    );
}

#[tokio::test]
async fn discovery_reports_both_protocols_in_fixed_order() {
    let network = FakeNetwork::default()
        .with_open("10.0.0.6:23")
        .with_open("10.0.0.6:22")
        .with_open("10.0.0.2:23");
    let service = DiscoveryService::new(PortScanner::with_probe(network, 4), LogBroadcaster::new());

    let devices = service.discover("10.0.0.0/29").await.unwrap();

    let summary: Vec<(String, Vec<u16>)> = devices
        .iter()
        .map(|d| (d.ip.to_string(), d.open_ports.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("10.0.0.2".to_string(), vec![23]),
            ("10.0.0.6".to_string(), vec![22, 23]),
        ]
    );
}

#[tokio::test]
async fn oversized_subnet_is_rejected_before_any_probe() {
    let probes = Arc::new(AtomicUsize::new(0));

    struct Counting(Arc<AtomicUsize>);

    #[async_trait::async_trait]
    impl Probe for Counting {
        async fn is_open(&self, _addr: SocketAddrV4) -> Result<bool, confkeep_common::error::ScanError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    let events = LogBroadcaster::new();
    let mut sub = listening(&events).await;
    let service = DiscoveryService::new(
        PortScanner::with_probe(Counting(probes.clone()), 16),
        events.clone(),
    );

    let err = service.discover("10.0.0.0/8").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(probes.load(Ordering::SeqCst), 0);
    assert!(queued(&mut sub).is_empty());
}

#[tokio::test]
async fn ipv6_subnet_is_rejected() {
    let service = DiscoveryService::new(
        PortScanner::with_probe(FakeNetwork::default(), 4),
        LogBroadcaster::new(),
    );

    let err = service.discover("fe80::/120").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn tcp_probe_sees_loopback_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let probe = TcpProbe::new(Duration::from_millis(350));

    let open = probe
        .is_open(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port))
        .await
        .unwrap();

    assert!(open);
}
