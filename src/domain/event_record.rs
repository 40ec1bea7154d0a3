//! Content-interaction event records.
//!
//! A [`TrackEventInput`] is what a caller hands to the ingestor. It is
//! normalized into an [`EventDraft`], which the event store turns into an
//! immutable [`EventRecord`] by assigning an identifier and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActionType, ContentKind, DeviceType, EventId};

/// Open, schema-less metadata attached to an event.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Raw ingestion input as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackEventInput {
    /// External catalog reference, exactly as supplied.
    pub content_id: String,
    /// Kind of content the event refers to.
    pub content_type: ContentKind,
    /// Interaction performed.
    pub action_type: ActionType,
    /// Denormalized content label.
    pub content_title: Option<String>,
    /// Seconds watched; meaningful for `PLAY` / `COMPLETE`.
    pub duration: Option<u32>,
    /// Viewer reference.
    pub user_id: Option<String>,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Raw client signature.
    pub user_agent: Option<String>,
    /// Country code. `None` means "not provided".
    pub country: Option<String>,
    /// Free-form metadata. `None` means "not provided".
    pub metadata: Option<Metadata>,
}

impl TrackEventInput {
    /// Creates an input carrying only the required fields.
    #[must_use]
    pub fn new(
        content_id: impl Into<String>,
        content_type: ContentKind,
        action_type: ActionType,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            content_type,
            action_type,
            content_title: None,
            duration: None,
            user_id: None,
            ip_address: None,
            user_agent: None,
            country: None,
            metadata: None,
        }
    }
}

/// A normalized event awaiting persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    /// External catalog reference.
    pub content_id: String,
    /// Kind of content.
    pub content_type: ContentKind,
    /// Interaction performed.
    pub action_type: ActionType,
    /// Denormalized content label.
    pub content_title: Option<String>,
    /// Seconds watched.
    pub duration: Option<u32>,
    /// Viewer reference.
    pub user_id: Option<String>,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Raw client signature.
    pub user_agent: Option<String>,
    /// Derived device category, always populated.
    pub device_type: DeviceType,
    /// Country code, `None` when not provided.
    pub country: Option<String>,
    /// Free-form metadata, empty when not provided.
    pub metadata: Metadata,
}

impl EventDraft {
    /// Normalizes caller input into a draft.
    ///
    /// `metadata` defaults to an empty map; every other optional field is
    /// passed through untouched, so an explicit empty `country` stays
    /// distinct from an omitted one.
    #[must_use]
    pub fn from_input(input: TrackEventInput, device_type: DeviceType) -> Self {
        Self {
            content_id: input.content_id,
            content_type: input.content_type,
            action_type: input.action_type,
            content_title: input.content_title,
            duration: input.duration,
            user_id: input.user_id,
            ip_address: input.ip_address,
            user_agent: input.user_agent,
            device_type,
            country: input.country,
            metadata: input.metadata.unwrap_or_default(),
        }
    }

    /// Seals the draft into a persisted record.
    #[must_use]
    pub fn into_record(self, id: EventId, created_at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id,
            content_id: self.content_id,
            content_type: self.content_type,
            action_type: self.action_type,
            content_title: self.content_title,
            duration: self.duration,
            user_id: self.user_id,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            device_type: self.device_type,
            country: self.country,
            metadata: self.metadata,
            created_at,
        }
    }
}

/// Immutable, persisted content-interaction event.
///
/// Serializes with camelCase keys. Absent pass-through fields are omitted
/// entirely, while `country` is always emitted (as `null` when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Store-assigned identifier.
    pub id: EventId,
    /// External catalog reference.
    pub content_id: String,
    /// Kind of content.
    pub content_type: ContentKind,
    /// Interaction performed.
    pub action_type: ActionType,
    /// Denormalized content label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_title: Option<String>,
    /// Seconds watched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Viewer reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Client IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Raw client signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Derived device category.
    pub device_type: DeviceType,
    /// Country code or `null`.
    pub country: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Persistence timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_metadata_and_keeps_country_absent() {
        let input = TrackEventInput::new("123", ContentKind::Movie, ActionType::View);
        let draft = EventDraft::from_input(input, DeviceType::Unknown);
        assert!(draft.metadata.is_empty());
        assert_eq!(draft.country, None);
        assert_eq!(draft.duration, None);
    }

    #[test]
    fn draft_preserves_explicit_empty_country() {
        let mut input = TrackEventInput::new("123", ContentKind::Movie, ActionType::View);
        input.country = Some(String::new());
        let draft = EventDraft::from_input(input, DeviceType::Unknown);
        assert_eq!(draft.country.as_deref(), Some(""));
    }

    #[test]
    fn record_serialization_omits_undefined_fields_but_keeps_null_country() {
        let input = TrackEventInput::new("123", ContentKind::Movie, ActionType::View);
        let record = EventDraft::from_input(input, DeviceType::Unknown)
            .into_record(EventId::new(), Utc::now());

        let Ok(value) = serde_json::to_value(&record) else {
            panic!("serialization failed");
        };
        let Some(obj) = value.as_object() else {
            panic!("expected object");
        };
        assert!(!obj.contains_key("duration"));
        assert!(!obj.contains_key("userAgent"));
        assert!(!obj.contains_key("ipAddress"));
        assert_eq!(obj.get("country"), Some(&serde_json::Value::Null));
        assert_eq!(obj.get("metadata"), Some(&serde_json::json!({})));
        assert_eq!(obj.get("deviceType"), Some(&serde_json::json!("unknown")));
        assert_eq!(obj.get("contentType"), Some(&serde_json::json!("movie")));
        assert_eq!(obj.get("actionType"), Some(&serde_json::json!("VIEW")));
    }
}
