//! Collaborator doubles shared by the service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::notification::{NotificationError, NotificationForwarder};
use crate::domain::{ActionType, ContentCounter, CounterField, EventDraft, EventRecord};
use crate::persistence::{
    ContentRepository, EventStore, MemoryContentRepository, PersistenceError,
};

/// Event store whose every append fails with the same message.
#[derive(Debug)]
pub struct FailingEventStore {
    message: String,
}

impl FailingEventStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl EventStore for FailingEventStore {
    async fn append(&self, _draft: EventDraft) -> Result<EventRecord, PersistenceError> {
        Err(PersistenceError::Unavailable(self.message.clone()))
    }
}

/// Memory repository that counts calls and can be switched to failing.
#[derive(Debug)]
pub struct CountingRepository {
    inner: MemoryContentRepository,
    lookups: AtomicUsize,
    saves: AtomicUsize,
    increments: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl CountingRepository {
    pub fn new(inner: MemoryContentRepository) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            increments: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, message: &str) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.to_string());
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn increments(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), PersistenceError> {
        match self.failure.lock().ok().and_then(|f| f.clone()) {
            Some(message) => Err(PersistenceError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentRepository for CountingRepository {
    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_by_external_id(external_id).await
    }

    async fn save(&self, content: &ContentCounter) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.save(content).await
    }

    async fn increment(
        &self,
        external_id: i64,
        field: CounterField,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        self.increments.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.increment(external_id, field).await
    }
}

/// Forwarder remembering every action it was asked to push.
#[derive(Debug, Default)]
pub struct RecordingForwarder {
    received: Mutex<Vec<ActionType>>,
}

impl RecordingForwarder {
    pub fn received(&self) -> Vec<ActionType> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NotificationForwarder for RecordingForwarder {
    async fn push(&self, action: ActionType) -> Result<(), NotificationError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(action);
        }
        Ok(())
    }
}

/// Forwarder whose subscriber always refuses.
#[derive(Debug)]
pub struct RejectingForwarder;

#[async_trait]
impl NotificationForwarder for RejectingForwarder {
    async fn push(&self, action: ActionType) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected(format!("{action} not accepted")))
    }
}

/// Forwarder that panics mid-push.
#[derive(Debug)]
pub struct PanickingForwarder;

#[async_trait]
impl NotificationForwarder for PanickingForwarder {
    async fn push(&self, _action: ActionType) -> Result<(), NotificationError> {
        panic!("subscriber crashed");
    }
}
