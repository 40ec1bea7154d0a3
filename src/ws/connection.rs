//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! applying subscription commands and forwarding matching action signals.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::ActionFilter;
use crate::domain::{ActionSignal, ActionType};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and applies them.
/// - Forwards matching signals from the [`broadcast::Receiver`].
pub async fn run_connection(socket: WebSocket, mut signal_rx: broadcast::Receiver<ActionSignal>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut filter = ActionFilter::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut filter);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            signal = signal_rx.recv() => {
                match signal {
                    Ok(signal) => {
                        if !filter.admits(signal.action_type) {
                            continue;
                        }
                        let msg = WsMessage::server(
                            uuid::Uuid::new_v4().to_string(),
                            WsMessageType::Event,
                            serde_json::to_value(&signal).unwrap_or_default(),
                        );
                        let json = serde_json::to_string(&msg).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind action bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Splits raw action names into parsed types, the wildcard flag, and the
/// names that were not recognised.
fn parse_action_types(raw: &[String]) -> (Vec<ActionType>, bool, Vec<String>) {
    let mut actions = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for name in raw {
        if name == "*" {
            wildcard = true;
        } else if let Ok(action) = name.parse::<ActionType>() {
            actions.push(action);
        } else {
            rejected.push(name.clone());
        }
    }
    (actions, wildcard, rejected)
}

fn error_message(id: String, code: u16, message: &str) -> Option<String> {
    let err = WsMessage::server(
        id,
        WsMessageType::Error,
        serde_json::json!({ "code": code, "message": message }),
    );
    serde_json::to_string(&err).ok()
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, filter: &mut ActionFilter) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return error_message(String::new(), 400, "malformed JSON");
    };

    if msg.msg_type != WsMessageType::Command {
        return error_message(msg.id, 400, "expected a command message");
    }

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return error_message(msg.id, 404, "unknown command");
    };

    let payload = match command {
        WsCommand::Subscribe { action_types } => {
            let (actions, wildcard, rejected) = parse_action_types(&action_types);
            filter.allow(&actions, wildcard);
            serde_json::json!({
                "subscribed": actions,
                "rejected": rejected,
                "count": filter.named_count(),
                "wildcard": filter.is_wildcard(),
            })
        }
        WsCommand::Unsubscribe { action_types } => {
            let (actions, wildcard, rejected) = parse_action_types(&action_types);
            filter.deny(&actions, wildcard);
            serde_json::json!({
                "unsubscribed": actions,
                "rejected": rejected,
                "remaining_count": filter.named_count(),
                "wildcard": filter.is_wildcard(),
            })
        }
    };

    let response = WsMessage::server(msg.id, WsMessageType::Response, payload);
    serde_json::to_string(&response).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn command(payload: serde_json::Value) -> String {
        serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": "2024-06-01T00:00:00Z",
            "payload": payload,
        })
        .to_string()
    }

    fn reply(text: &str, filter: &mut ActionFilter) -> WsMessage {
        let Some(json) = handle_text_message(text, filter) else {
            panic!("expected a reply");
        };
        let Ok(msg) = serde_json::from_str::<WsMessage>(&json) else {
            panic!("reply is not a ws message");
        };
        msg
    }

    #[test]
    fn subscribe_updates_filter() {
        let mut filter = ActionFilter::new();
        let msg = reply(
            &command(serde_json::json!({"command": "subscribe", "action_types": ["VIEW", "LIKE"]})),
            &mut filter,
        );
        assert_eq!(msg.msg_type, WsMessageType::Response);
        assert_eq!(msg.id, "req-1");
        assert_eq!(msg.payload.get("rejected"), Some(&serde_json::json!(["LIKE"])));
        assert!(filter.admits(ActionType::View));
        assert!(!filter.admits(ActionType::Click));
    }

    #[test]
    fn wildcard_unsubscribe_clears_flag() {
        let mut filter = ActionFilter::new();
        filter.allow(&[], true);
        let msg = reply(
            &command(serde_json::json!({"command": "unsubscribe", "action_types": ["*"]})),
            &mut filter,
        );
        assert_eq!(msg.payload.get("wildcard"), Some(&serde_json::json!(false)));
        assert!(!filter.is_wildcard());
    }

    #[test]
    fn malformed_json_yields_error() {
        let mut filter = ActionFilter::new();
        let msg = reply("{not json", &mut filter);
        assert_eq!(msg.msg_type, WsMessageType::Error);
    }

    #[test]
    fn unknown_command_yields_error() {
        let mut filter = ActionFilter::new();
        let msg = reply(&command(serde_json::json!({"command": "rewind"})), &mut filter);
        assert_eq!(msg.msg_type, WsMessageType::Error);
        assert_eq!(msg.payload.get("code"), Some(&serde_json::json!(404)));
    }
}
