//! The [`PushChannel`] implementation backed by live WebSocket connections.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::PushChannel;

use crate::connection::ConnectionManager;
use crate::message::OutboundMessage;

/// Wraps the connection manager so services can push without depending on
/// this crate's internals.
#[derive(Clone)]
pub struct WsGateway {
    manager: Arc<ConnectionManager>,
}

impl WsGateway {
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl PushChannel for WsGateway {
    /// An error here means the user has no open connection that accepted
    /// the frame; callers treat that as "offline", not as a failure of the
    /// underlying state change.
    async fn send_to_user(&self, user_id: Uuid, payload: serde_json::Value) -> AppResult<()> {
        let frame = OutboundMessage::Event { payload }.to_text();
        if self.manager.send_to_user(user_id, &frame) == 0 {
            return Err(AppError::delivery("User has no open connection"));
        }
        Ok(())
    }

    /// Topic pushes with zero subscribers succeed; an empty room is normal.
    async fn send_to_topic(&self, topic: &str, payload: serde_json::Value) -> AppResult<()> {
        let frame = OutboundMessage::Event { payload }.to_text();
        self.manager.send_to_topic(topic, &frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krise_core::config::RealtimeConfig;
    use krise_entity::user::UserRole;

    #[tokio::test]
    async fn test_send_to_offline_user_is_a_delivery_error() {
        let manager = Arc::new(ConnectionManager::new(RealtimeConfig::default()));
        let gateway = WsGateway::new(manager);

        let err = gateway
            .send_to_user(Uuid::new_v4(), serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Delivery);
    }

    #[tokio::test]
    async fn test_send_to_connected_user_delivers_event_frame() {
        let manager = Arc::new(ConnectionManager::new(RealtimeConfig::default()));
        let user = Uuid::new_v4();
        let (_handle, mut rx) = manager.register(user, UserRole::User);

        let gateway = WsGateway::new(manager);
        gateway
            .send_to_user(user, serde_json::json!({"type": "INFO"}))
            .await
            .unwrap();

        let frame = rx.recv().await.unwrap();
        assert!(frame.contains("\"type\":\"event\""));
    }
}
