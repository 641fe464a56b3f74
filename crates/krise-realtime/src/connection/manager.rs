//! Connection lifecycle and inbound message routing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use krise_core::config::RealtimeConfig;
use krise_entity::user::UserRole;

use crate::channel::TopicRegistry;
use crate::message::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Owns the pool and registry; the API layer's socket tasks call into this.
#[derive(Debug)]
pub struct ConnectionManager {
    pool: ConnectionPool,
    topics: TopicRegistry,
    config: RealtimeConfig,
}

impl ConnectionManager {
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: ConnectionPool::new(),
            topics: TopicRegistry::new(),
            config,
        }
    }

    /// Registers an authenticated connection.
    ///
    /// Returns the handle plus the receiver the socket task drains to the
    /// wire. A user at the connection limit has their oldest connection
    /// evicted.
    pub fn register(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let existing = self.pool.user_connections(user_id);
        if existing.len() >= self.config.max_connections_per_user {
            if let Some(oldest) = existing.first() {
                warn!(
                    user_id = %user_id,
                    evicted = %oldest.id,
                    "Connection limit reached, evicting oldest"
                );
                self.unregister(&oldest.id);
            }
        }

        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, role, tx));
        self.pool.add(handle.clone());

        info!(conn_id = %handle.id, user_id = %user_id, "WebSocket connection registered");
        (handle, rx)
    }

    /// Removes a connection and detaches its subscriptions.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            self.topics.unsubscribe_all(*conn_id);
            debug!(conn_id = %conn_id, "WebSocket connection unregistered");
        }
    }

    /// Handles one parsed client message, answering on the same connection.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, message: InboundMessage) {
        let Some(handle) = self.pool.get(conn_id) else {
            return;
        };
        match message {
            InboundMessage::Subscribe { topic } => {
                self.topics.subscribe(&topic, *conn_id);
                handle.send(OutboundMessage::Subscribed { topic }.to_text());
            }
            InboundMessage::Unsubscribe { topic } => {
                self.topics.unsubscribe(&topic, *conn_id);
                handle.send(OutboundMessage::Unsubscribed { topic }.to_text());
            }
            InboundMessage::Pong => {}
        }
    }

    /// Delivers a frame to every open connection of one user. Returns the
    /// number of connections that accepted it.
    pub fn send_to_user(&self, user_id: Uuid, frame: &str) -> usize {
        self.pool
            .user_connections(user_id)
            .iter()
            .filter(|handle| handle.send(frame.to_string()))
            .count()
    }

    /// Delivers a frame to every subscriber of a topic. Returns the number
    /// of connections that accepted it.
    pub fn send_to_topic(&self, topic: &str, frame: &str) -> usize {
        self.topics
            .subscribers(topic)
            .iter()
            .filter_map(|conn_id| self.pool.get(conn_id))
            .filter(|handle| handle.send(frame.to_string()))
            .count()
    }

    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Seconds between server keepalive pings.
    pub fn ping_interval_seconds(&self) -> u64 {
        self.config.ping_interval_seconds
    }
}
