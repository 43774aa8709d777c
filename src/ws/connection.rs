//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{MarketEvent, SiteId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads subscription commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<MarketEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(market_event) => {
                        if subs.matches(market_event.site_id()) {
                            let msg = WsMessage {
                                id: uuid::Uuid::new_v4().to_string(),
                                msg_type: WsMessageType::Event,
                                timestamp: chrono::Utc::now(),
                                payload: serde_json::to_value(&market_event).unwrap_or_default(),
                            };
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        let err = WsMessage {
            id: String::new(),
            msg_type: WsMessageType::Error,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "code": 400,
                "message": "malformed JSON"
            }),
        };
        return serde_json::to_string(&err).ok();
    };

    match serde_json::from_value::<WsCommand>(msg.payload.clone()) {
        Ok(WsCommand::Subscribe { site_ids }) => {
            let (ids, wildcard) = parse_site_ids(&site_ids);
            subs.subscribe(&ids, wildcard);
            let response = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "subscribed": ids,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            };
            serde_json::to_string(&response).ok()
        }
        Ok(WsCommand::Unsubscribe { site_ids }) => {
            let (ids, _) = parse_site_ids(&site_ids);
            subs.unsubscribe(&ids);
            let response = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "unsubscribed": ids,
                    "remaining_count": subs.count(),
                }),
            };
            serde_json::to_string(&response).ok()
        }
        Err(_) => {
            let err = WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Error,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "code": 404,
                    "message": "unknown command"
                }),
            };
            serde_json::to_string(&err).ok()
        }
    }
}

/// Extracts numeric site IDs from a JSON array, treating the string
/// `"*"` as the wildcard. IDs may arrive as numbers or numeric strings.
fn parse_site_ids(values: &[serde_json::Value]) -> (Vec<SiteId>, bool) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    for value in values {
        if let Some(id) = value.as_i64() {
            ids.push(id);
        } else if let Some(s) = value.as_str() {
            if s == "*" {
                wildcard = true;
            } else if let Ok(id) = s.parse::<SiteId>() {
                ids.push(id);
            }
        }
    }
    (ids, wildcard)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_site_ids_accepts_numbers_and_strings() {
        let values = vec![
            serde_json::json!(1),
            serde_json::json!("2"),
            serde_json::json!("*"),
            serde_json::json!("not-a-number"),
        ];
        let (ids, wildcard) = parse_site_ids(&values);
        assert_eq!(ids, vec![1, 2]);
        assert!(wildcard);
    }

    #[test]
    fn subscribe_command_updates_manager() {
        let mut subs = SubscriptionManager::new();
        let msg = serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "subscribe", "site_ids": [7]}
        });
        let text = serde_json::to_string(&msg).unwrap_or_default();
        let response = handle_text_message(&text, &mut subs);
        assert!(response.is_some());
        assert!(subs.matches(7));
    }

    #[test]
    fn unsubscribe_command_removes_site() {
        let mut subs = SubscriptionManager::new();
        subs.subscribe(&[7, 8], false);

        let msg = serde_json::json!({
            "id": "req-2",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "unsubscribe", "site_ids": [7]}
        });
        let text = serde_json::to_string(&msg).unwrap_or_default();
        let response = handle_text_message(&text, &mut subs);
        assert!(response.is_some());
        assert!(!subs.matches(7));
        assert!(subs.matches(8));
    }

    #[test]
    fn unknown_command_yields_error_message() {
        let mut subs = SubscriptionManager::new();
        let msg = serde_json::json!({
            "id": "req-3",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "teleport", "site_ids": [1]}
        });
        let text = serde_json::to_string(&msg).unwrap_or_default();
        let response = handle_text_message(&text, &mut subs);
        let Some(response) = response else {
            panic!("expected error response");
        };
        assert!(response.contains("unknown command"));
        assert!(!subs.matches(1));
    }

    #[test]
    fn malformed_json_yields_error_message() {
        let mut subs = SubscriptionManager::new();
        let response = handle_text_message("{not json", &mut subs);
        let Some(response) = response else {
            panic!("expected error response");
        };
        assert!(response.contains("malformed JSON"));
    }
}
