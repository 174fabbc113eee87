use std::collections::HashSet;
use std::net::SocketAddrV4;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use confkeep_common::error::{DeviceError, ScanError};
use confkeep_common::network::host::Protocol;
use confkeep_core::device::{DeviceSession, DeviceTarget};
use confkeep_core::events::{LogBroadcaster, Subscription};
use confkeep_core::scanner::Probe;

/// A network where only the listed sockets accept connections.
#[derive(Default)]
pub struct FakeNetwork {
    open: HashSet<SocketAddrV4>,
}

impl FakeNetwork {
    pub fn with_open(mut self, addr: &str) -> Self {
        self.open.insert(addr.parse().expect("fixture socket address"));
        self
    }
}

#[async_trait]
impl Probe for FakeNetwork {
    async fn is_open(&self, addr: SocketAddrV4) -> Result<bool, ScanError> {
        Ok(self.open.contains(&addr))
    }
}

/// A device that serves a fixed running-config and records what gets pushed.
pub struct FakeSwitch {
    running_config: String,
    reachable: bool,
    pushed: Arc<Mutex<Vec<String>>>,
}

impl FakeSwitch {
    pub fn serving(running_config: &str) -> Self {
        Self {
            running_config: running_config.to_string(),
            reachable: true,
            pushed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::serving("")
        }
    }

    /// Shared log of every line pushed, still readable after the switch
    /// has been handed to a service.
    pub fn pushed_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.pushed.clone()
    }
}

#[async_trait]
impl DeviceSession for FakeSwitch {
    async fn fetch_running_config(&self, target: &DeviceTarget) -> Result<String, DeviceError> {
        if !self.reachable {
            return Err(DeviceError::Connect(format!("{} timed out", target.address)));
        }
        Ok(self.running_config.clone())
    }

    async fn apply_config(&self, target: &DeviceTarget, lines: &[String]) -> Result<(), DeviceError> {
        if !self.reachable {
            return Err(DeviceError::Connect(format!("{} timed out", target.address)));
        }
        if let Ok(mut pushed) = self.pushed.lock() {
            pushed.extend(lines.iter().cloned());
        }
        Ok(())
    }
}

pub fn switch_target(address: &str, protocol: Protocol) -> DeviceTarget {
    DeviceTarget {
        address: address.to_string(),
        username: "admin".to_string(),
        password: "admin".to_string(),
        device_type: "cisco_ios".to_string(),
        protocol,
    }
}

/// Subscribes and discards the connected notice.
pub async fn listening(events: &LogBroadcaster) -> Subscription {
    let mut sub = events.subscribe();
    let _ = sub.recv().await;
    sub
}

/// Messages queued on `sub` right now, in delivery order.
pub fn queued(sub: &mut Subscription) -> Vec<String> {
    std::iter::from_fn(|| sub.try_recv()).map(|e| e.message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "fixture socket address")]
    fn mistyped_open_socket_fails_loudly() {
        let _ = FakeNetwork::default().with_open("192.168.1.1:ssh");
    }

    #[tokio::test]
    async fn listed_socket_is_the_only_open_one() {
        let network = FakeNetwork::default().with_open("192.168.1.1:22");
        let open = SocketAddrV4::new([192, 168, 1, 1].into(), 22);
        let other = SocketAddrV4::new([192, 168, 1, 1].into(), 23);

        assert!(network.is_open(open).await.unwrap());
        assert!(!network.is_open(other).await.unwrap());
    }
}
