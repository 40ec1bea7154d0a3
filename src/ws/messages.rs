//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn server(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast action signal.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands a client can send in the `payload` of a `command` message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Start receiving signals for the listed action types.
    Subscribe {
        /// Action types such as `"VIEW"`. Use `["*"]` for all.
        action_types: Vec<String>,
    },
    /// Stop receiving signals for the listed action types.
    Unsubscribe {
        /// Action types to drop. `"*"` clears the wildcard.
        action_types: Vec<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_command_parses() {
        let payload = serde_json::json!({
            "command": "subscribe",
            "action_types": ["VIEW", "*"]
        });
        let Ok(WsCommand::Subscribe { action_types }) = serde_json::from_value(payload) else {
            panic!("expected subscribe command");
        };
        assert_eq!(action_types, vec!["VIEW".to_string(), "*".to_string()]);
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::server("1".to_string(), WsMessageType::Event, serde_json::json!({}));
        let json = serde_json::to_string(&msg).unwrap_or_default();
        assert!(json.contains("\"type\":\"event\""));
    }
}
