//! Event ingestion DTOs.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ActionType, ContentKind, DeviceType, EventRecord, Metadata, TrackEventInput};

/// Request body for `POST /api/v1/events`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventRequest {
    /// External catalog reference.
    pub content_id: String,
    /// `movie` or `series`.
    #[schema(value_type = String, example = "movie")]
    pub content_type: ContentKind,
    /// `VIEW`, `CLICK`, `PLAY` or `COMPLETE`.
    #[schema(value_type = String, example = "VIEW")]
    pub action_type: ActionType,
    /// Denormalized content label.
    pub content_title: Option<String>,
    /// Seconds watched.
    pub duration: Option<u32>,
    /// Viewer reference.
    pub user_id: Option<String>,
    /// Client IP address. Falls back to `X-Forwarded-For` / `X-Real-IP`.
    pub ip_address: Option<String>,
    /// Raw client signature. Falls back to the `User-Agent` header.
    pub user_agent: Option<String>,
    /// Country code.
    pub country: Option<String>,
    /// Free-form metadata object.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
}

impl TrackEventRequest {
    /// Converts the body into pipeline input, filling client details the
    /// body left out from the request headers.
    #[must_use]
    pub fn into_input(self, headers: &HeaderMap) -> TrackEventInput {
        TrackEventInput {
            content_id: self.content_id,
            content_type: self.content_type,
            action_type: self.action_type,
            content_title: self.content_title,
            duration: self.duration,
            user_id: self.user_id,
            ip_address: self.ip_address.or_else(|| client_ip(headers)),
            user_agent: self.user_agent.or_else(|| header_str(headers, "user-agent")),
            country: self.country,
            metadata: self.metadata,
        }
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|xff| xff.split(',').next().map(|ip| ip.trim().to_owned()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
}

/// Response body for an ingested event.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRecordDto {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// External catalog reference.
    pub content_id: String,
    /// Kind of content.
    #[schema(value_type = String, example = "movie")]
    pub content_type: ContentKind,
    /// Interaction performed.
    #[schema(value_type = String, example = "VIEW")]
    pub action_type: ActionType,
    /// Denormalized content label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_title: Option<String>,
    /// Seconds watched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Viewer reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Client IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Raw client signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// `mobile`, `desktop` or `unknown`.
    #[schema(value_type = String, example = "desktop")]
    pub device_type: DeviceType,
    /// Country code or `null`.
    pub country: Option<String>,
    /// Free-form metadata object.
    #[schema(value_type = Object)]
    pub metadata: Metadata,
    /// Persistence timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<EventRecord> for EventRecordDto {
    fn from(record: EventRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            content_id: record.content_id,
            content_type: record.content_type,
            action_type: record.action_type,
            content_title: record.content_title,
            duration: record.duration,
            user_id: record.user_id,
            ip_address: record.ip_address,
            user_agent: record.user_agent,
            device_type: record.device_type,
            country: record.country,
            metadata: record.metadata,
            created_at: record.created_at,
        }
    }
}
