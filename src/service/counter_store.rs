//! Folds ingested events into per-item engagement counters.

use std::sync::Arc;

use crate::domain::{ActionType, ContentCounter, ContentKind, CounterField};
use crate::persistence::{ContentRepository, PersistenceError};

/// What applying one event to the counters amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterOutcome {
    /// The content identifier is not an integer; no lookup was made.
    MalformedIdentifier,
    /// No cataloged item carries the identifier.
    Missing,
    /// The action touches no counter.
    Unchanged,
    /// One counter went up by exactly one.
    Incremented {
        /// Counter that was bumped.
        field: CounterField,
        /// Its value after the increment.
        value: i64,
    },
}

/// Engagement counters partitioned by [`ContentKind`].
///
/// Each kind owns its own [`ContentRepository`]; the partition for an event
/// is picked by an exhaustive match, so adding a kind forces a decision
/// here.
#[derive(Debug, Clone)]
pub struct ContentCounterStore {
    movies: Arc<dyn ContentRepository>,
    series: Arc<dyn ContentRepository>,
}

impl ContentCounterStore {
    /// Creates a store over the movie and series partitions.
    #[must_use]
    pub fn new(movies: Arc<dyn ContentRepository>, series: Arc<dyn ContentRepository>) -> Self {
        Self { movies, series }
    }

    /// Returns the repository holding counters for `kind`.
    #[must_use]
    pub fn repository(&self, kind: ContentKind) -> &dyn ContentRepository {
        match kind {
            ContentKind::Movie => self.movies.as_ref(),
            ContentKind::Series => self.series.as_ref(),
        }
    }

    /// Applies one event to the counters of the item it references.
    ///
    /// Increments go through the repository's atomic primitive, so
    /// concurrent events for the same item never overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the lookup or the increment fails.
    /// Unknown items and non-numeric identifiers are not errors.
    pub async fn apply(
        &self,
        kind: ContentKind,
        content_id: &str,
        action: ActionType,
    ) -> Result<CounterOutcome, PersistenceError> {
        let Ok(external_id) = content_id.parse::<i64>() else {
            return Ok(CounterOutcome::MalformedIdentifier);
        };

        let repo = self.repository(kind);
        if repo.find_by_external_id(external_id).await?.is_none() {
            return Ok(CounterOutcome::Missing);
        }

        let Some(field) = CounterField::for_action(action) else {
            return Ok(CounterOutcome::Unchanged);
        };

        // The item may have been removed from the catalog since the lookup.
        Ok(match repo.increment(external_id, field).await? {
            Some(updated) => CounterOutcome::Incremented {
                field,
                value: updated.get(field),
            },
            None => CounterOutcome::Missing,
        })
    }

    /// Adds an item to the catalog of `kind`, or renames it if it already
    /// exists, and returns its current counters.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on storage failure, or
    /// [`PersistenceError::Unavailable`] if the item cannot be read back.
    pub async fn register(
        &self,
        kind: ContentKind,
        external_id: i64,
        title: Option<String>,
    ) -> Result<ContentCounter, PersistenceError> {
        let repo = self.repository(kind);
        repo.save(&ContentCounter::new(0, external_id, title)).await?;
        repo.find_by_external_id(external_id).await?.ok_or_else(|| {
            PersistenceError::Unavailable(format!("{kind} {external_id} not readable after save"))
        })
    }

    /// Reads the counters of one item.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] on storage failure.
    pub async fn lookup(
        &self,
        kind: ContentKind,
        external_id: i64,
    ) -> Result<Option<ContentCounter>, PersistenceError> {
        self.repository(kind).find_by_external_id(external_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryContentRepository;
    use crate::service::test_support::CountingRepository;

    fn movie(external_id: i64, views: i64, clicks: i64) -> ContentCounter {
        let mut counter = ContentCounter::new(external_id, external_id, None);
        counter.view_count = views;
        counter.click_count = clicks;
        counter
    }

    fn store_with(
        movies: Vec<ContentCounter>,
    ) -> (ContentCounterStore, Arc<CountingRepository>, Arc<CountingRepository>) {
        let movies = Arc::new(CountingRepository::new(MemoryContentRepository::with_items(
            movies,
        )));
        let series = Arc::new(CountingRepository::new(MemoryContentRepository::new()));
        let store = ContentCounterStore::new(
            Arc::clone(&movies) as Arc<dyn ContentRepository>,
            Arc::clone(&series) as Arc<dyn ContentRepository>,
        );
        (store, movies, series)
    }

    #[tokio::test]
    async fn view_increments_only_view_count() {
        let (store, movies, _) = store_with(vec![movie(123, 10, 4)]);

        let outcome = store.apply(ContentKind::Movie, "123", ActionType::View).await;
        assert!(matches!(
            outcome,
            Ok(CounterOutcome::Incremented { field: CounterField::Views, value: 11 })
        ));

        let Ok(Some(item)) = store.lookup(ContentKind::Movie, 123).await else {
            panic!("movie missing");
        };
        assert_eq!(item.view_count, 11);
        assert_eq!(item.click_count, 4);
        assert_eq!(movies.increments(), 1);
    }

    #[tokio::test]
    async fn click_increments_only_click_count() {
        let (store, _, _) = store_with(vec![movie(123, 10, 4)]);

        let outcome = store.apply(ContentKind::Movie, "123", ActionType::Click).await;
        assert!(matches!(
            outcome,
            Ok(CounterOutcome::Incremented { field: CounterField::Clicks, value: 5 })
        ));

        let Ok(Some(item)) = store.lookup(ContentKind::Movie, 123).await else {
            panic!("movie missing");
        };
        assert_eq!(item.view_count, 10);
    }

    #[tokio::test]
    async fn play_and_complete_never_mutate() {
        let (store, movies, _) = store_with(vec![movie(123, 10, 4)]);

        for action in [ActionType::Play, ActionType::Complete] {
            let outcome = store.apply(ContentKind::Movie, "123", action).await;
            assert!(matches!(outcome, Ok(CounterOutcome::Unchanged)));
        }
        assert_eq!(movies.increments(), 0);
        assert_eq!(movies.saves(), 0);
    }

    #[tokio::test]
    async fn non_numeric_identifier_skips_lookup() {
        let (store, movies, series) = store_with(vec![movie(123, 10, 4)]);

        let outcome = store.apply(ContentKind::Movie, "invalid", ActionType::View).await;
        assert!(matches!(outcome, Ok(CounterOutcome::MalformedIdentifier)));

        let outcome = store.apply(ContentKind::Movie, "12abc", ActionType::View).await;
        assert!(matches!(outcome, Ok(CounterOutcome::MalformedIdentifier)));

        assert_eq!(movies.lookups(), 0);
        assert_eq!(series.lookups(), 0);
    }

    #[tokio::test]
    async fn missing_item_is_a_silent_miss() {
        let (store, movies, _) = store_with(vec![]);

        let outcome = store.apply(ContentKind::Movie, "404", ActionType::View).await;
        assert!(matches!(outcome, Ok(CounterOutcome::Missing)));
        assert_eq!(movies.lookups(), 1);
        assert_eq!(movies.increments(), 0);
        assert_eq!(movies.saves(), 0);
    }

    #[tokio::test]
    async fn kind_selects_partition() {
        let (store, movies, series) = store_with(vec![movie(7, 0, 0)]);

        let outcome = store.apply(ContentKind::Series, "7", ActionType::View).await;
        assert!(matches!(outcome, Ok(CounterOutcome::Missing)));
        assert_eq!(series.lookups(), 1);
        assert_eq!(movies.lookups(), 0);
    }

    #[tokio::test]
    async fn registered_item_starts_counting() {
        let (store, movies, _) = store_with(vec![]);

        let Ok(item) = store.register(ContentKind::Movie, 321, Some("Ronin".to_string())).await
        else {
            panic!("register failed");
        };
        assert_eq!(item.view_count, 0);
        assert_eq!(movies.saves(), 1);

        let outcome = store.apply(ContentKind::Movie, "321", ActionType::View).await;
        assert!(matches!(
            outcome,
            Ok(CounterOutcome::Incremented { field: CounterField::Views, value: 1 })
        ));
    }

    #[tokio::test]
    async fn re_registering_keeps_counters() {
        let (store, _, _) = store_with(vec![movie(5, 8, 2)]);

        let Ok(item) = store.register(ContentKind::Movie, 5, Some("Renamed".to_string())).await
        else {
            panic!("register failed");
        };
        assert_eq!(item.title.as_deref(), Some("Renamed"));
        assert_eq!(item.view_count, 8);
        assert_eq!(item.click_count, 2);
    }

    #[tokio::test]
    async fn lookup_failure_is_reported() {
        let (store, movies, _) = store_with(vec![movie(1, 0, 0)]);
        movies.fail_with("replica down");

        let outcome = store.apply(ContentKind::Movie, "1", ActionType::View).await;
        assert!(matches!(outcome, Err(PersistenceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn concurrent_views_are_all_counted() {
        let (store, _, _) = store_with(vec![movie(9, 0, 0)]);
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.apply(ContentKind::Movie, "9", ActionType::View).await
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(Ok(CounterOutcome::Incremented { .. }))));
        }

        let Ok(Some(item)) = store.lookup(ContentKind::Movie, 9).await else {
            panic!("movie missing");
        };
        assert_eq!(item.view_count, 50);
    }
}
