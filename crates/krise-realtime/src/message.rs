//! WebSocket wire messages.

use serde::{Deserialize, Serialize};

/// Messages sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a topic (e.g. `position:<household_id>`).
    Subscribe { topic: String },
    /// Unsubscribe from a topic.
    Unsubscribe { topic: String },
    /// Keepalive response.
    Pong,
}

/// Messages sent by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Subscription confirmed.
    Subscribed { topic: String },
    /// Unsubscription confirmed.
    Unsubscribed { topic: String },
    /// A pushed event; the payload carries its own `type` field.
    Event { payload: serde_json::Value },
    /// Server keepalive.
    Ping,
    /// Protocol error.
    Error { message: String },
}

impl OutboundMessage {
    /// Serialize for the wire. Infallible for these variants in practice;
    /// a failure falls back to a plain error frame.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failed"}"#.to_string())
    }
}
