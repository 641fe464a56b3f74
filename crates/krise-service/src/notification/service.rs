//! Notification persistence and best-effort push delivery.
//!
//! Every producer in the system funnels through `notify_user` or
//! `notify_household`: the notification is persisted first, then pushed to
//! the recipient's private channel. Push failure is logged and swallowed;
//! the persisted record is the source of truth.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::PushChannel;
use krise_entity::notification::{NewNotification, Notification, NotificationKind};
use krise_entity::stores::{NotificationStore, UserDirectory};

use crate::context::RequestContext;

/// Manages user notifications and delivers them over the push channel.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserDirectory>,
    push: Arc<dyn PushChannel>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserDirectory>,
        push: Arc<dyn PushChannel>,
    ) -> Self {
        Self {
            notifications,
            users,
            push,
        }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.notifications.find_by_user_ordered(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        self.notifications
            .mark_read(notification_id, ctx.user_id)
            .await
    }

    /// Persists a notification for one user, then attempts push delivery.
    ///
    /// Returns the persisted notification. Push failure never surfaces.
    pub async fn notify_user(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> AppResult<Notification> {
        let notification = self
            .notifications
            .save(NewNotification {
                user_id,
                kind,
                message: message.into(),
            })
            .await?;

        self.push_to_user(&notification).await;
        Ok(notification)
    }

    /// Persists one notification per registered household member, pushing to
    /// each. A failure for one member never aborts delivery to the rest.
    pub async fn notify_household(
        &self,
        household_id: Uuid,
        kind: NotificationKind,
        message: &str,
    ) -> AppResult<usize> {
        let members = self.users.find_by_household(household_id).await?;
        let mut notified = 0;

        for member in &members {
            match self
                .notifications
                .save(NewNotification {
                    user_id: member.id,
                    kind,
                    message: message.to_string(),
                })
                .await
            {
                Ok(notification) => {
                    self.push_to_user(&notification).await;
                    notified += 1;
                }
                Err(e) => {
                    warn!(
                        user_id = %member.id,
                        household_id = %household_id,
                        error = %e,
                        "Failed to persist household notification"
                    );
                }
            }
        }

        Ok(notified)
    }

    /// Pushes an informational broadcast to the shared notifications topic.
    /// Admin only; nothing is persisted.
    pub async fn broadcast(&self, ctx: &RequestContext, message: &str) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::authorization(
                "Only admins may broadcast notifications",
            ));
        }

        let payload = serde_json::json!({
            "type": "BROADCAST",
            "message": message,
        });

        if let Err(e) = self.push.send_to_topic("notifications", payload).await {
            warn!(error = %e, "Broadcast push failed");
        }
        Ok(())
    }

    async fn push_to_user(&self, notification: &Notification) {
        let payload = match serde_json::to_value(notification) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize notification for push");
                return;
            }
        };

        if let Err(e) = self.push.send_to_user(notification.user_id, payload).await {
            warn!(
                user_id = %notification.user_id,
                notification_id = %notification.id,
                error = %e,
                "Push delivery failed; notification persisted"
            );
        }
    }
}
