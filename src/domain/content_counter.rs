//! Per-item engagement counters owned by the catalog.

use serde::{Deserialize, Serialize};

use super::ActionType;

/// Engagement counters for one catalog item.
///
/// Rows pre-exist in the catalog; this service only ever increments
/// `view_count` and `click_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCounter {
    /// Internal storage identifier.
    pub id: i64,
    /// Catalog's own reference key, unique within a content kind.
    pub external_id: i64,
    /// Display title.
    pub title: Option<String>,
    /// Number of `VIEW` events folded in.
    pub view_count: i64,
    /// Number of `CLICK` events folded in.
    pub click_count: i64,
}

impl ContentCounter {
    /// Creates a zeroed counter for a newly cataloged item.
    #[must_use]
    pub fn new(id: i64, external_id: i64, title: Option<String>) -> Self {
        Self {
            id,
            external_id,
            title,
            view_count: 0,
            click_count: 0,
        }
    }

    /// Returns the current value of `field`.
    #[must_use]
    pub const fn get(&self, field: CounterField) -> i64 {
        match field {
            CounterField::Views => self.view_count,
            CounterField::Clicks => self.click_count,
        }
    }

    /// Adds one to `field`.
    pub fn bump(&mut self, field: CounterField) {
        match field {
            CounterField::Views => self.view_count = self.view_count.saturating_add(1),
            CounterField::Clicks => self.click_count = self.click_count.saturating_add(1),
        }
    }
}

/// Which counter an action contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterField {
    /// `view_count`.
    Views,
    /// `click_count`.
    Clicks,
}

impl CounterField {
    /// Maps an action to the counter it increments, if any.
    ///
    /// `PLAY` and `COMPLETE` only carry duration data and touch no counter.
    #[must_use]
    pub const fn for_action(action: ActionType) -> Option<Self> {
        match action {
            ActionType::View => Some(Self::Views),
            ActionType::Click => Some(Self::Clicks),
            ActionType::Play | ActionType::Complete => None,
        }
    }

    /// Column name backing this counter.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Views => "view_count",
            Self::Clicks => "click_count",
        }
    }
}
