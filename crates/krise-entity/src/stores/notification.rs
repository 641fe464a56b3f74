//! Notification persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::notification::{NewNotification, Notification};

/// Persistence for per-user notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn save(&self, notification: NewNotification) -> AppResult<Notification>;

    /// All notifications for a user, newest first.
    async fn find_by_user_ordered(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Mark one of the user's notifications as read. Fails with NotFound if
    /// the notification does not exist or belongs to another user.
    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()>;
}
