//! # Backup and Restore Service
//!
//! Orchestrates a device session, the backup store and the event stream.
//! Every step that an operator would want to watch is published on the
//! [`LogBroadcaster`]; failures are published at `error` level before being
//! returned.

use chrono::{Local, NaiveDate};
use confkeep_common::backup::{BackupOutcome, BackupRecord};
use confkeep_common::error::{ServiceError, ServiceResult};
use tracing::{info, warn};

use crate::device::{self, DeviceSession, DeviceTarget};
use crate::events::LogBroadcaster;
use crate::storage::BackupStore;

pub struct BackupService<S: DeviceSession> {
    store: BackupStore,
    session: S,
    events: LogBroadcaster,
}

impl<S: DeviceSession> BackupService<S> {
    pub fn new(store: BackupStore, session: S, events: LogBroadcaster) -> Self {
        Self {
            store,
            session,
            events,
        }
    }

    /// Backs up the running config under today's local date.
    pub async fn backup(&self, target: &DeviceTarget) -> ServiceResult<BackupOutcome> {
        self.backup_on(target, Local::now().date_naive()).await
    }

    pub async fn backup_on(&self, target: &DeviceTarget, date: NaiveDate) -> ServiceResult<BackupOutcome> {
        let address = &target.address;
        self.events
            .publish(format!("Backup requested for {address} via {}", target.protocol));

        let saved = async {
            let running_config = self.session.fetch_running_config(target).await?;
            let file = self
                .store
                .save(&target.device_type, address, date, &running_config)?;
            Ok::<String, ServiceError>(file)
        }
        .await;

        let file = saved.map_err(|e| self.report_failure("Backup", address, e))?;

        let name = file.rsplit('/').next().unwrap_or(file.as_str());
        self.events
            .publish(format!("Backup complete for {address}: {name}"));
        info!("Saved backup of {address} to {file}");

        Ok(BackupOutcome {
            device: address.clone(),
            file,
        })
    }

    /// Replays a stored backup onto the device.
    ///
    /// The backup path is resolved first; traversal attempts and missing
    /// files are rejected before anything is published or sent.
    pub async fn restore(&self, target: &DeviceTarget, backup_file: &str) -> ServiceResult<BackupOutcome> {
        let config_text = self.store.read(backup_file)?;
        let address = &target.address;

        self.events.publish(format!(
            "Restore requested for {address} using {backup_file} via {}",
            target.protocol
        ));

        let applied = async {
            let lines = device::restore_lines(&config_text)?;
            self.session.apply_config(target, &lines).await?;
            Ok::<(), ServiceError>(())
        }
        .await;

        applied.map_err(|e| self.report_failure("Restore", address, e))?;

        self.events.publish(format!("Restore completed for {address}"));
        info!("Restored {backup_file} onto {address}");

        Ok(BackupOutcome {
            device: address.clone(),
            file: backup_file.to_string(),
        })
    }

    /// Content of a stored backup, for browsing before a restore.
    pub fn content(&self, backup_file: &str) -> ServiceResult<String> {
        Ok(self.store.read(backup_file)?)
    }

    pub fn list(&self) -> ServiceResult<Vec<BackupRecord>> {
        Ok(self.store.list()?)
    }

    fn report_failure(&self, action: &str, address: &str, error: ServiceError) -> ServiceError {
        warn!("{action} of {address} failed: {error}");
        self.events
            .publish_error(format!("{action} failed for {address}: {error}"));
        error
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
