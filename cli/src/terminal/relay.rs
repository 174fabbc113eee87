use confkeep_common::event::{LEVEL_ERROR, LEVEL_WARN, LogEvent};
use confkeep_core::events::Subscription;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::terminal::logging::EVENT_TARGET;

/// Mirrors the live event stream into the terminal log until every
/// broadcaster handle is gone.
pub fn spawn(mut subscription: Subscription) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(greeting) = subscription.recv().await {
            debug!(target: EVENT_TARGET, "{}", greeting.message);
        }
        while let Some(event) = subscription.recv().await {
            emit(&event);
        }
    })
}

fn emit(event: &LogEvent) {
    let stamp = event.timestamp.format("%H:%M:%S");
    match event.level.as_str() {
        LEVEL_ERROR => error!(target: EVENT_TARGET, "{stamp} {}", event.message),
        LEVEL_WARN => warn!(target: EVENT_TARGET, "{stamp} {}", event.message),
        _ => info!(target: EVENT_TARGET, "{stamp} {}", event.message),
    }
}
