//! Best-effort forwarding of action signals to real-time subscribers.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{ActionBus, ActionSignal, ActionType};

/// Failure to hand a signal to the downstream subscriber.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The downstream subscriber refused the signal.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Pushes an action signal somewhere real-time.
///
/// Callers run this fire-and-forget; an error never affects ingestion.
#[async_trait]
pub trait NotificationForwarder: Send + Sync + fmt::Debug {
    /// Forwards one action signal.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] if the signal could not be delivered.
    async fn push(&self, action: ActionType) -> Result<(), NotificationError>;
}

/// Forwarder publishing onto the in-process [`ActionBus`], from which
/// WebSocket connections pick signals up.
#[derive(Debug, Clone)]
pub struct BroadcastForwarder {
    bus: ActionBus,
}

impl BroadcastForwarder {
    /// Creates a forwarder over `bus`.
    #[must_use]
    pub fn new(bus: ActionBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl NotificationForwarder for BroadcastForwarder {
    async fn push(&self, action: ActionType) -> Result<(), NotificationError> {
        let receivers = self.bus.publish(ActionSignal::now(action));
        tracing::trace!(%action, receivers, "action signal published");
        Ok(())
    }
}
