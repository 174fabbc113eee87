//! Shared models, errors and configuration for `confkeep`.
//!
//! * [`network`]: subnet validation, the [`network::range::Network`] block and discovered hosts.
//! * [`backup`]: backup listing records.
//! * [`event`]: operational events streamed to live observers.
//! * [`error`]: the error taxonomy used across the workspace.

pub mod backup;
pub mod config;
pub mod error;
pub mod event;
pub mod network;
