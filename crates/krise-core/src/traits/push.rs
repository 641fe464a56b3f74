//! Real-time push abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Delivers JSON payloads to connected WebSocket clients.
///
/// Implemented by the realtime gateway. Services persist state first and
/// treat push delivery as best-effort; a returned error means no connection
/// accepted the message, and callers decide whether that matters.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Push a payload to every open connection belonging to a user.
    async fn send_to_user(&self, user_id: Uuid, payload: serde_json::Value) -> AppResult<()>;

    /// Push a payload to every subscriber of a named topic.
    async fn send_to_topic(&self, topic: &str, payload: serde_json::Value) -> AppResult<()>;
}
