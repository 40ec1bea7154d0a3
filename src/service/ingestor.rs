//! Event ingestion: classify, persist, then fan out in the background.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::counter_store::{ContentCounterStore, CounterOutcome};
use super::notification::NotificationForwarder;
use super::supervisor::spawn_supervised;
use crate::domain::{EventDraft, EventRecord, TrackEventInput, classify};
use crate::persistence::{EventStore, PersistenceError};

/// Handles to the background work scheduled by one ingested event.
///
/// Dropping this detaches the tasks; they keep running.
#[derive(Debug)]
pub struct PendingSideEffects {
    counters: JoinHandle<()>,
    notification: JoinHandle<()>,
}

impl PendingSideEffects {
    /// Waits until both background tasks have finished.
    ///
    /// Task failures were already logged by their supervisor and are not
    /// reported here.
    pub async fn settled(self) {
        let _ = self.counters.await;
        let _ = self.notification.await;
    }
}

/// Entry point of the ingestion pipeline.
///
/// Only the event-store write is awaited. Counter aggregation and
/// notification run as independent supervised tasks whose outcome never
/// reaches the caller.
#[derive(Debug, Clone)]
pub struct EventIngestor {
    events: Arc<dyn EventStore>,
    counters: Arc<ContentCounterStore>,
    notifier: Arc<dyn NotificationForwarder>,
}

impl EventIngestor {
    /// Creates an ingestor over its collaborators.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventStore>,
        counters: Arc<ContentCounterStore>,
        notifier: Arc<dyn NotificationForwarder>,
    ) -> Self {
        Self {
            events,
            counters,
            notifier,
        }
    }

    /// Returns the counter store the ingestor feeds.
    #[must_use]
    pub fn counters(&self) -> &Arc<ContentCounterStore> {
        &self.counters
    }

    /// Records one interaction event.
    ///
    /// Returns as soon as the event is durably stored; counter aggregation
    /// and notification continue in the background.
    ///
    /// # Errors
    ///
    /// Returns the event store's [`PersistenceError`] unchanged if the
    /// write fails. Nothing is scheduled in that case.
    pub async fn track_event(&self, input: TrackEventInput) -> Result<EventRecord, PersistenceError> {
        let (record, _detached) = self.track_event_detached(input).await?;
        Ok(record)
    }

    /// Same as [`Self::track_event`], but also hands back the background
    /// task handles.
    ///
    /// # Errors
    ///
    /// Returns the event store's [`PersistenceError`] unchanged if the
    /// write fails. Nothing is scheduled in that case.
    pub async fn track_event_detached(
        &self,
        input: TrackEventInput,
    ) -> Result<(EventRecord, PendingSideEffects), PersistenceError> {
        let device_type = classify(input.user_agent.as_deref());
        let draft = EventDraft::from_input(input, device_type);

        let record = self.events.append(draft).await.inspect_err(|e| {
            tracing::error!(error = %e, "event append failed");
        })?;

        tracing::debug!(
            event_id = %record.id,
            content_type = %record.content_type,
            action = %record.action_type,
            device = record.device_type.as_str(),
            "event recorded"
        );

        let pending = self.schedule_side_effects(&record);
        Ok((record, pending))
    }

    fn schedule_side_effects(&self, record: &EventRecord) -> PendingSideEffects {
        let counters = Arc::clone(&self.counters);
        let kind = record.content_type;
        let content_id = record.content_id.clone();
        let action = record.action_type;
        let counters = spawn_supervised("counter_aggregation", async move {
            let outcome = counters.apply(kind, &content_id, action).await?;
            match &outcome {
                CounterOutcome::Incremented { field, value } => {
                    tracing::debug!(%kind, %content_id, ?field, value, "counter incremented");
                }
                CounterOutcome::Missing | CounterOutcome::MalformedIdentifier => {
                    tracing::debug!(%kind, %content_id, ?outcome, "counter skipped");
                }
                CounterOutcome::Unchanged => {}
            }
            Ok::<_, PersistenceError>(outcome)
        });

        let notifier = Arc::clone(&self.notifier);
        let notification =
            spawn_supervised("notification", async move { notifier.push(action).await });

        PendingSideEffects {
            counters,
            notification,
        }
    }
}
