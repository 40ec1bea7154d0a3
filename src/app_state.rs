//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ActionBus;
use crate::persistence::{
    ContentRepository, EventStore, MemoryContentRepository, MemoryEventStore,
};
use crate::service::{BroadcastForwarder, ContentCounterStore, EventIngestor};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ingestion pipeline entry point.
    pub ingestor: Arc<EventIngestor>,
    /// Action signal bus for WebSocket subscriptions.
    pub action_bus: ActionBus,
}

impl AppState {
    /// Wires the ingestion pipeline over the given storage backends.
    ///
    /// Notifications go out through a [`BroadcastForwarder`] on `action_bus`.
    #[must_use]
    pub fn with_backends(
        events: Arc<dyn EventStore>,
        movies: Arc<dyn ContentRepository>,
        series: Arc<dyn ContentRepository>,
        action_bus: ActionBus,
    ) -> Self {
        let counters = Arc::new(ContentCounterStore::new(movies, series));
        let forwarder = Arc::new(BroadcastForwarder::new(action_bus.clone()));
        let ingestor = Arc::new(EventIngestor::new(events, counters, forwarder));
        Self {
            ingestor,
            action_bus,
        }
    }

    /// Wires the pipeline entirely in process memory.
    #[must_use]
    pub fn in_memory(notification_channel_capacity: usize) -> Self {
        Self::with_backends(
            Arc::new(MemoryEventStore::new()),
            Arc::new(MemoryContentRepository::new()),
            Arc::new(MemoryContentRepository::new()),
            ActionBus::new(notification_channel_capacity),
        )
    }
}
