//! # IPv4 Network Model
//!
//! A validated, immutable IPv4 block. Values are produced by
//! [`crate::network::subnet::validate`] and consumed by the port scanner.

use std::fmt;
use std::net::Ipv4Addr;

/// An IPv4 network with host bits cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    base: Ipv4Addr,
    prefix: u8,
}

impl Network {
    /// Builds the network containing `ip`, normalizing host bits to zero.
    ///
    /// `prefix` must be at most 32; callers go through subnet validation,
    /// which guarantees this.
    pub(crate) fn new(ip: Ipv4Addr, prefix: u8) -> Self {
        let base = u32::from(ip) & mask(prefix);
        Self {
            base: Ipv4Addr::from(base),
            prefix,
        }
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !mask(self.prefix))
    }

    /// Total number of addresses in the block, network and broadcast included.
    pub fn address_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// Usable host addresses in ascending order.
    ///
    /// The network and broadcast addresses are skipped, except for `/31`
    /// point-to-point links and `/32` single hosts where every address is usable.
    pub fn hosts(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = u32::from(self.base);
        let end: u32 = u32::from(self.broadcast());

        let (first, last) = if self.prefix >= 31 {
            (start, end)
        } else {
            (start + 1, end - 1)
        };

        (first..=last).map(Ipv4Addr::from)
    }

    pub fn host_count(&self) -> u64 {
        match self.prefix {
            31 | 32 => self.address_count(),
            _ => self.address_count() - 2,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
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
