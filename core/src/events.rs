//! # Live Event Broadcasting
//!
//! Fans one publisher's [`LogEvent`]s out to any number of observers.
//!
//! The registry maps a subscription id to the sending half of an unbounded
//! channel. It is only touched under a single lock, and only for the short
//! register / unregister / snapshot steps. Delivery happens on a snapshot taken
//! with the lock released, so a stalled observer never delays the publisher or
//! anyone else.
//!
//! A [`Subscription`] unregisters itself when dropped, so a crashed or
//! disconnected observer cannot leave a dead entry behind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use confkeep_common::event::LogEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

type Registry = HashMap<u64, UnboundedSender<LogEvent>>;

#[derive(Default)]
struct Inner {
    subscribers: Mutex<Registry>,
    next_id: AtomicU64,
}

impl Inner {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to a shared subscriber registry.
#[derive(Clone, Default)]
pub struct LogBroadcaster {
    inner: Arc<Inner>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer.
    ///
    /// The first event the subscription yields is always
    /// [`LogEvent::connected`]. After that it receives every event published
    /// from now on, in publish order. Nothing published earlier is replayed.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(LogEvent::connected());

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.registry().insert(id, tx);
        trace!("subscriber {id} registered");

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, message: impl Into<String>) -> usize {
        self.deliver(LogEvent::info(message))
    }

    pub fn publish_error(&self, message: impl Into<String>) -> usize {
        self.deliver(LogEvent::error(message))
    }

    pub fn publish_with_level(&self, level: &str, message: impl Into<String>) -> usize {
        self.deliver(LogEvent::new(level, message))
    }

    /// Delivers one event to every currently registered subscriber and
    /// returns how many received it. Never blocks on a subscriber.
    fn deliver(&self, event: LogEvent) -> usize {
        let snapshot: Vec<UnboundedSender<LogEvent>> =
            self.inner.registry().values().cloned().collect();

        snapshot
            .iter()
            .filter(|tx| tx.send(event.clone()).is_ok())
            .count()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.registry().len()
    }
}

/// An observer's end of the broadcast. Owned by exactly one observer.
pub struct Subscription {
    id: u64,
    rx: UnboundedReceiver<LogEvent>,
    registry: Weak<Inner>,
}

impl Subscription {
    /// Waits for the next event.
    ///
    /// Returns `None` once every [`LogBroadcaster`] handle is gone and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<LogEvent> {
        self.rx.recv().await
    }

    /// Takes the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<LogEvent> {
        self.rx.try_recv().ok()
    }

    /// Unregisters and discards anything still queued.
    pub fn close(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.registry().remove(&self.id);
            trace!("subscriber {} unregistered", self.id);
        }
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
