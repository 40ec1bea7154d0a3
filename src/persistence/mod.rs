//! Persistence layer: the append-only event log and the catalog counters.
//!
//! Both concerns sit behind object-safe traits so the ingestion pipeline
//! can run against PostgreSQL ([`postgres`]) or process memory
//! ([`memory`]).

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{ContentCounter, CounterField, EventDraft, EventRecord};

pub use memory::{MemoryContentRepository, MemoryEventStore};
pub use postgres::{PostgresContentRepository, PostgresEventStore};

/// Failure of a storage operation.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The database rejected or failed the query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backing store cannot accept writes.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store of [`EventRecord`]s.
#[async_trait]
pub trait EventStore: Send + Sync + fmt::Debug {
    /// Durably persists a draft, assigning its identifier and timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the write does not complete.
    async fn append(&self, draft: EventDraft) -> Result<EventRecord, PersistenceError>;
}

/// Counter storage for a single content kind, keyed by external identifier.
#[async_trait]
pub trait ContentRepository: Send + Sync + fmt::Debug {
    /// Looks up an item by its catalog identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on storage failure. A missing item is
    /// `Ok(None)`.
    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<ContentCounter>, PersistenceError>;

    /// Registers an item or refreshes its title. Existing counters are kept
    /// and the storage `id` is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on storage failure.
    async fn save(&self, content: &ContentCounter) -> Result<(), PersistenceError>;

    /// Atomically adds one to `field` and returns the updated row, or
    /// `None` if no item carries `external_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on storage failure.
    async fn increment(
        &self,
        external_id: i64,
        field: CounterField,
    ) -> Result<Option<ContentCounter>, PersistenceError>;
}
