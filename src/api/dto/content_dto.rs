//! Counter read DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ContentCounter, ContentKind};

/// Request body for `PUT /api/v1/content/{kind}/{external_id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContentRequest {
    /// Display title. Replaces the stored one.
    pub title: Option<String>,
}

/// Response body for `GET /api/v1/content/{kind}/{external_id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentCounterDto {
    /// Partition the item belongs to.
    #[schema(value_type = String, example = "movie")]
    pub content_type: ContentKind,
    /// Catalog identifier.
    pub external_id: i64,
    /// Display title.
    pub title: Option<String>,
    /// Folded-in `VIEW` events.
    pub view_count: i64,
    /// Folded-in `CLICK` events.
    pub click_count: i64,
}

impl ContentCounterDto {
    /// Builds the DTO for an item of `kind`.
    #[must_use]
    pub fn new(kind: ContentKind, counter: ContentCounter) -> Self {
        Self {
            content_type: kind,
            external_id: counter.external_id,
            title: counter.title,
            view_count: counter.view_count,
            click_count: counter.click_count,
        }
    }
}
