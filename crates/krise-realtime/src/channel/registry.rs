//! Topic registry mapping topics to subscribed connections.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::connection::ConnectionId;

/// Which connections listen to which topics, with a reverse index so a
/// closing connection can be detached from everything in one call.
#[derive(Debug, Default)]
pub struct TopicRegistry {
    subscribers: DashMap<String, HashSet<ConnectionId>>,
    topics_by_conn: DashMap<ConnectionId, HashSet<String>>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, topic: &str, conn_id: ConnectionId) {
        self.subscribers
            .entry(topic.to_string())
            .or_default()
            .insert(conn_id);
        self.topics_by_conn
            .entry(conn_id)
            .or_default()
            .insert(topic.to_string());
    }

    pub fn unsubscribe(&self, topic: &str, conn_id: ConnectionId) {
        if let Some(mut subs) = self.subscribers.get_mut(topic) {
            subs.remove(&conn_id);
            if subs.is_empty() {
                drop(subs);
                self.subscribers.remove(topic);
            }
        }
        if let Some(mut topics) = self.topics_by_conn.get_mut(&conn_id) {
            topics.remove(topic);
        }
    }

    /// Detaches a connection from every topic it subscribed to.
    pub fn unsubscribe_all(&self, conn_id: ConnectionId) {
        let Some((_, topics)) = self.topics_by_conn.remove(&conn_id) else {
            return;
        };
        for topic in &topics {
            if let Some(mut subs) = self.subscribers.get_mut(topic) {
                subs.remove(&conn_id);
                if subs.is_empty() {
                    drop(subs);
                    self.subscribers.remove(topic);
                }
            }
        }
    }

    pub fn subscribers(&self, topic: &str) -> Vec<ConnectionId> {
        self.subscribers
            .get(topic)
            .map(|subs| subs.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn topic_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_unsubscribe_all_empties_topics() {
        let registry = TopicRegistry::new();
        let conn = Uuid::new_v4();
        registry.subscribe("position:a", conn);
        registry.subscribe("notifications", conn);

        registry.unsubscribe_all(conn);

        assert!(registry.subscribers("position:a").is_empty());
        assert_eq!(registry.topic_count(), 0);
    }

    #[test]
    fn test_topic_survives_while_subscribers_remain() {
        let registry = TopicRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        registry.subscribe("notifications", a);
        registry.subscribe("notifications", b);

        registry.unsubscribe("notifications", a);
        assert_eq!(registry.subscribers("notifications"), vec![b]);
    }
}
