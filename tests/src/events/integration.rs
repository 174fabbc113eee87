use std::time::Duration;

use confkeep_common::network::host::Protocol;
use confkeep_core::backup::BackupService;
use confkeep_core::discovery::DiscoveryService;
use confkeep_core::events::LogBroadcaster;
use confkeep_core::scanner::PortScanner;
use confkeep_core::storage::BackupStore;
use tempfile::TempDir;
use tokio::time::timeout;

use crate::fixtures::{FakeNetwork, FakeSwitch, listening, queued, switch_target};

#[tokio::test]
async fn every_observer_sees_the_same_narration() {
    let events = LogBroadcaster::new();
    let mut first = listening(&events).await;
    let mut second = listening(&events).await;
    let root = TempDir::new().unwrap();

    let discovery = DiscoveryService::new(
        PortScanner::with_probe(FakeNetwork::default().with_open("10.9.0.1:23"), 8),
        events.clone(),
    );
    let backups = BackupService::new(
        BackupStore::new(root.path()),
        FakeSwitch::serving("hostname EDGE\n"),
        events.clone(),
    );

    discovery.discover("10.9.0.0/30").await.unwrap();
    backups
        .backup(&switch_target("10.9.0.1", Protocol::Telnet))
        .await
        .unwrap();

    let seen = queued(&mut first);
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[2], "Backup requested for 10.9.0.1 via telnet");
    assert!(seen[3].starts_with("Backup complete for 10.9.0.1: running-config_"));
    assert_eq!(seen, queued(&mut second));
}

#[tokio::test]
async fn closed_observer_is_forgotten() {
    let events = LogBroadcaster::new();
    let keep = events.subscribe();
    let leave = events.subscribe();
    assert_eq!(events.subscriber_count(), 2);

    leave.close();

    assert_eq!(events.subscriber_count(), 1);
    assert_eq!(events.publish("still here"), 1);
    drop(keep);
    assert_eq!(events.subscriber_count(), 0);
}

#[tokio::test]
async fn stream_ends_once_services_are_gone() {
    let events = LogBroadcaster::new();
    let mut sub = listening(&events).await;
    let discovery = DiscoveryService::new(
        PortScanner::with_probe(FakeNetwork::default(), 2),
        events,
    );

    discovery.discover("172.16.0.0/31").await.unwrap();
    drop(discovery);

    let mut drained = Vec::new();
    while let Some(event) = timeout(Duration::from_secs(1), sub.recv()).await.unwrap() {
        drained.push(event.message);
    }
    assert_eq!(
        drained,
        vec![
            "Discovery started for 172.16.0.0/31",
            "Discovery finished for 172.16.0.0/31: 0 device(s) found",
        ]
    );
}
