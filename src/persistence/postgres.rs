//! PostgreSQL implementations of the persistence traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use super::{ContentRepository, EventStore, PersistenceError};
use crate::domain::{ContentCounter, ContentKind, CounterField, EventDraft, EventId, EventRecord};

/// Event log backed by the `content_events` table.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn append(&self, draft: EventDraft) -> Result<EventRecord, PersistenceError> {
        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO content_events \
             (content_id, content_type, action_type, content_title, duration, user_id, \
              ip_address, user_agent, device_type, country, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id, created_at",
        )
        .bind(&draft.content_id)
        .bind(draft.content_type.as_str())
        .bind(draft.action_type.as_str())
        .bind(&draft.content_title)
        .bind(draft.duration.map(i64::from))
        .bind(&draft.user_id)
        .bind(&draft.ip_address)
        .bind(&draft.user_agent)
        .bind(draft.device_type.as_str())
        .bind(&draft.country)
        .bind(Json(&draft.metadata))
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.into_record(EventId::from_uuid(id), created_at))
    }
}

type CounterRow = (i64, i64, Option<String>, i64, i64);

fn counter_from_row(
    (id, external_id, title, view_count, click_count): CounterRow,
) -> ContentCounter {
    ContentCounter {
        id,
        external_id,
        title,
        view_count,
        click_count,
    }
}

/// Counter partition backed by the `movies` or `series` table.
#[derive(Debug, Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
    kind: ContentKind,
}

impl PostgresContentRepository {
    /// Creates a repository for the partition of `kind`.
    #[must_use]
    pub fn new(pool: PgPool, kind: ContentKind) -> Self {
        Self { pool, kind }
    }

    const fn table(&self) -> &'static str {
        match self.kind {
            ContentKind::Movie => "movies",
            ContentKind::Series => "series",
        }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        let sql = format!(
            "SELECT id, external_id, title, view_count, click_count FROM {} \
             WHERE external_id = $1",
            self.table()
        );
        let row = sqlx::query_as::<_, CounterRow>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(counter_from_row))
    }

    async fn save(&self, content: &ContentCounter) -> Result<(), PersistenceError> {
        let sql = format!(
            "INSERT INTO {} (external_id, title, view_count, click_count) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (external_id) DO UPDATE SET title = EXCLUDED.title",
            self.table()
        );
        sqlx::query(&sql)
            .bind(content.external_id)
            .bind(&content.title)
            .bind(content.view_count.max(0))
            .bind(content.click_count.max(0))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn increment(
        &self,
        external_id: i64,
        field: CounterField,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        let column = field.column();
        let sql = format!(
            "UPDATE {table} SET {column} = {column} + 1 WHERE external_id = $1 \
             RETURNING id, external_id, title, view_count, click_count",
            table = self.table(),
        );
        let row = sqlx::query_as::<_, CounterRow>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(counter_from_row))
    }
}
