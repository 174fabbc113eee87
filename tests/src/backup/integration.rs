use chrono::NaiveDate;
use confkeep_common::error::{ErrorKind, ServiceError, StorageError};
use confkeep_common::network::host::Protocol;
use confkeep_core::backup::BackupService;
use confkeep_core::events::LogBroadcaster;
use confkeep_core::storage::BackupStore;
use tempfile::TempDir;

use crate::fixtures::{FakeSwitch, listening, queued, switch_target};

const RUNNING_CONFIG: &str = "!\nhostname CORE-SW1\n!\ninterface Vlan10\n ip address 10.0.10.1 255.255.255.0\n\nend\n";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[tokio::test]
async fn backup_then_browse_then_restore() {
    let root = TempDir::new().unwrap();
    let events = LogBroadcaster::new();
    let service = BackupService::new(
        BackupStore::new(root.path()),
        FakeSwitch::serving(RUNNING_CONFIG),
        events.clone(),
    );
    let target = switch_target("10.0.10.1", Protocol::Ssh);

    let saved = service.backup_on(&target, day(5)).await.unwrap();
    assert_eq!(saved.file, "cisco_ios/10.0.10.1/running-config_2024-03-05.txt");

    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, saved.file);
    assert_eq!(listed[0].name, "running-config_2024-03-05.txt");
    assert_eq!(service.content(&saved.file).unwrap(), RUNNING_CONFIG);

    let mut sub = listening(&events).await;
    service.restore(&target, &saved.file).await.unwrap();

    assert_eq!(
        queued(&mut sub),
        vec![
            "Restore requested for 10.0.10.1 using cisco_ios/10.0.10.1/running-config_2024-03-05.txt via ssh",
            "Restore completed for 10.0.10.1",
        ]
    );
}

#[tokio::test]
async fn restore_pushes_only_configuration_lines() {
    let root = TempDir::new().unwrap();
    let switch = FakeSwitch::serving(RUNNING_CONFIG);
    let pushed = switch.pushed_log();
    let service = BackupService::new(BackupStore::new(root.path()), switch, LogBroadcaster::new());
    let target = switch_target("10.0.10.1", Protocol::Telnet);

    let saved = service.backup_on(&target, day(5)).await.unwrap();
    service.restore(&target, &saved.file).await.unwrap();

    assert_eq!(
        *pushed.lock().unwrap(),
        vec![
            "hostname CORE-SW1",
            "interface Vlan10",
            " ip address 10.0.10.1 255.255.255.0",
            "end",
        ]
    );
}

#[tokio::test]
async fn backups_on_different_days_are_listed_in_path_order() {
    let root = TempDir::new().unwrap();
    let service = BackupService::new(
        BackupStore::new(root.path()),
        FakeSwitch::serving(RUNNING_CONFIG),
        LogBroadcaster::new(),
    );

    for (address, d) in [("10.0.0.9", 2), ("10.0.0.1", 7), ("10.0.0.1", 3)] {
        service
            .backup_on(&switch_target(address, Protocol::Ssh), day(d))
            .await
            .unwrap();
    }

    let paths: Vec<String> = service.list().unwrap().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "cisco_ios/10.0.0.1/running-config_2024-03-03.txt",
            "cisco_ios/10.0.0.1/running-config_2024-03-07.txt",
            "cisco_ios/10.0.0.9/running-config_2024-03-02.txt",
        ]
    );
}

#[tokio::test]
async fn unreachable_device_leaves_no_artifact() {
    let root = TempDir::new().unwrap();
    let events = LogBroadcaster::new();
    let mut sub = listening(&events).await;
    let service = BackupService::new(
        BackupStore::new(root.path()),
        FakeSwitch::unreachable(),
        events.clone(),
    );

    let err = service
        .backup_on(&switch_target("10.0.0.1", Protocol::Ssh), day(1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Operational);
    assert!(service.list().unwrap().is_empty());
    let published = queued(&mut sub);
    assert_eq!(published[0], "Backup requested for 10.0.0.1 via ssh");
    assert!(published[1].starts_with("Backup failed for 10.0.0.1:"));
}

#[test]
fn traversal_is_rejected_even_without_a_backup_root() {
    let root = TempDir::new().unwrap();
    let store = BackupStore::new(root.path().join("never-created"));

    let err = store.read("../../etc/passwd").unwrap_err();

    assert!(matches!(err, StorageError::PathTraversal(_)));
    assert_eq!(ServiceError::from(err).kind(), ErrorKind::Validation);
}

#[test]
fn listing_a_missing_root_is_empty() {
    let root = TempDir::new().unwrap();
    let store = BackupStore::new(root.path().join("missing"));

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn unknown_backup_is_not_found() {
    let root = TempDir::new().unwrap();
    let store = BackupStore::new(root.path());

    let err = store.read("cisco_ios/10.0.0.1/running-config_2024-03-01.txt").unwrap_err();

    assert_eq!(ServiceError::from(err).kind(), ErrorKind::NotFound);
}
