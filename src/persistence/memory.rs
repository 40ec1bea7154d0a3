//! In-process storage backends.
//!
//! Used when persistence is disabled and throughout the test suite. Both
//! stores follow the same locking discipline as a single database row:
//! every mutation happens under one write lock, so counter increments are
//! atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ContentRepository, EventStore, PersistenceError};
use crate::domain::{ContentCounter, CounterField, EventDraft, EventId, EventRecord};

/// Event log held in a `Vec`, in append order.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    records: RwLock<Vec<EventRecord>>,
}

impl MemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored record.
    pub async fn records(&self) -> Vec<EventRecord> {
        self.records.read().await.clone()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn append(&self, draft: EventDraft) -> Result<EventRecord, PersistenceError> {
        let record = draft.into_record(EventId::new(), Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }
}

/// Counter partition held in a `HashMap` keyed by external identifier.
#[derive(Debug, Default)]
pub struct MemoryContentRepository {
    items: RwLock<HashMap<i64, ContentCounter>>,
}

impl MemoryContentRepository {
    /// Creates an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a partition pre-populated with `items`.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = ContentCounter>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.external_id, item))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Returns the number of cataloged items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if the partition holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ContentRepository for MemoryContentRepository {
    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        Ok(self.items.read().await.get(&external_id).cloned())
    }

    async fn save(&self, content: &ContentCounter) -> Result<(), PersistenceError> {
        let mut items = self.items.write().await;
        if let Some(existing) = items.get_mut(&content.external_id) {
            existing.title.clone_from(&content.title);
            return Ok(());
        }
        let next_id = items.values().map(|item| item.id).max().unwrap_or(0).saturating_add(1);
        let mut fresh = content.clone();
        fresh.id = next_id;
        fresh.view_count = fresh.view_count.max(0);
        fresh.click_count = fresh.click_count.max(0);
        items.insert(content.external_id, fresh);
        Ok(())
    }

    async fn increment(
        &self,
        external_id: i64,
        field: CounterField,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&external_id).map(|item| {
            item.bump(field);
            item.clone()
        }))
    }
}
