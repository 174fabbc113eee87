//! # confkeep core
//!
//! The pieces of `confkeep` with real concurrency or safety invariants:
//!
//! * [`scanner`]: bounded fan-out of TCP probes over a subnet.
//! * [`storage`]: traversal-safe backup paths and backup enumeration.
//! * [`events`]: non-blocking fan-out of operational events to live observers.
//!
//! [`discovery`] and [`backup`] compose them into the operator-facing use
//! cases; [`device`] is the boundary to the device automation layer.

pub mod backup;
pub mod device;
pub mod discovery;
pub mod events;
pub mod network;
pub mod scanner;
pub mod storage;
