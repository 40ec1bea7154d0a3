//! Broadcast channel for action signals.
//!
//! [`ActionBus`] wraps a [`tokio::sync::broadcast`] channel. Every ingested
//! event publishes an [`ActionSignal`] through the bus and each WebSocket
//! connection subscribes to receive the ones it asked for.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use super::ActionType;

/// Real-time signal that an interaction of some type just happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSignal {
    /// Interaction that was ingested.
    pub action_type: ActionType,
    /// When the signal was emitted.
    pub timestamp: DateTime<Utc>,
}

impl ActionSignal {
    /// Creates a signal stamped with the current time.
    #[must_use]
    pub fn now(action_type: ActionType) -> Self {
        Self {
            action_type,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcast bus for [`ActionSignal`]s.
///
/// When the ring buffer is full, the oldest signals are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct ActionBus {
    sender: broadcast::Sender<ActionSignal>,
}

impl ActionBus {
    /// Creates a new `ActionBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a signal to all subscribers.
    ///
    /// Returns the number of receivers reached; zero when nobody listens.
    pub fn publish(&self, signal: ActionSignal) -> usize {
        self.sender.send(signal).unwrap_or(0)
    }

    /// Creates a receiver for all future signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ActionSignal> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
