//! Handle to a single WebSocket connection.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use krise_entity::user::UserRole;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// One authenticated WebSocket connection.
///
/// Holds the sender half of the outbound queue; the socket task owns the
/// receiver and writes frames to the wire.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub user_id: Uuid,
    pub role: UserRole,
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    pub fn new(user_id: Uuid, role: UserRole, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Queues a frame without blocking. Returns whether the frame was
    /// accepted; a full buffer drops the frame, a closed socket marks the
    /// connection dead.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, frame dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(Uuid::new_v4(), UserRole::User, tx);
        drop(rx);

        assert!(!handle.send("{}".to_string()));
        assert!(!handle.is_alive());
    }

    #[tokio::test]
    async fn test_full_buffer_drops_frame_but_stays_alive() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(Uuid::new_v4(), UserRole::User, tx);

        assert!(handle.send("a".to_string()));
        assert!(!handle.send("b".to_string()));
        assert!(handle.is_alive());
    }
}
