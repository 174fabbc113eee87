//! Cross-crate scenarios for confkeep: discovery, backup and restore flows,
//! and the live event stream, driven through the public service APIs.

pub mod fixtures;

#[cfg(test)]
mod backup;
#[cfg(test)]
mod discovery;
#[cfg(test)]
mod events;
