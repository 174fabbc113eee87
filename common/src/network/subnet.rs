//! # Subnet Validation
//!
//! Turns operator input such as `192.168.1.0/24` into a [`Network`] before any
//! probe is sent. The address count is capped to bound scan fan-out.
//!
//! Host bits are accepted and silently cleared, so `192.168.1.5/24` yields
//! `192.168.1.0/24`. A bare address is treated as a `/32`.

use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::error::SubnetError;
use crate::network::range::Network;

/// Largest block a single discovery request may cover.
pub const MAX_ADDRESSES: u64 = 4096;

pub fn validate(input: &str) -> Result<Network, SubnetError> {
    let parsed = input
        .trim()
        .parse::<IpNetwork>()
        .map_err(|e| SubnetError::InvalidFormat(format!("'{input}': {e}")))?;

    let IpNetwork::V4(ipv4_network) = parsed else {
        return Err(SubnetError::UnsupportedFamily);
    };

    let network = Network::new(ipv4_network.ip(), ipv4_network.prefix());
    let addresses = network.address_count();
    if addresses > MAX_ADDRESSES {
        return Err(SubnetError::RangeTooLarge {
            addresses,
            max: MAX_ADDRESSES,
        });
    }

    Ok(network)
}

impl FromStr for Network {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
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
