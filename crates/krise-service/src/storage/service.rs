//! Storage inventory reads and the daily expiry scan.

use std::sync::Arc;

use tracing::{info, warn};

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::Clock;
use krise_entity::notification::NotificationKind;
use krise_entity::storage::StorageItem;
use krise_entity::stores::{StorageStore, UserDirectory};

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Inventory listing plus the scheduled expiry scan.
#[derive(Clone)]
pub struct StorageService {
    storage: Arc<dyn StorageStore>,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
    notifications: NotificationService,
}

impl StorageService {
    /// Creates a new storage service.
    pub fn new(
        storage: Arc<dyn StorageStore>,
        users: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            storage,
            users,
            clock,
            notifications,
        }
    }

    /// The caller's household inventory.
    pub async fn household_storage(&self, ctx: &RequestContext) -> AppResult<Vec<StorageItem>> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let household_id = user
            .household_id
            .ok_or_else(|| AppError::validation("You do not belong to a household"))?;
        self.storage.find_by_household(household_id).await
    }

    /// Notifies households about items expiring within `window_days`.
    ///
    /// Run daily by the scheduler. One notification per expiring item goes
    /// to every member of the owning household; a failure for one item is
    /// logged and the scan moves on. Returns the number of notifications
    /// persisted.
    pub async fn run_expiry_scan(&self, window_days: i64) -> AppResult<usize> {
        let now = self.clock.now();
        let until = now + chrono::Duration::days(window_days);
        let expiring = self.storage.find_expiring_between(now, until).await?;

        let mut persisted = 0;
        for item in &expiring {
            let days_left = (item.expiration - now).num_days();
            let message = expiry_message(&item.item_name, days_left);
            match self
                .notifications
                .notify_household(item.household_id, NotificationKind::StockControl, &message)
                .await
            {
                Ok(count) => persisted += count,
                Err(e) => {
                    warn!(
                        item_id = %item.id,
                        household_id = %item.household_id,
                        error = %e,
                        "Expiry notification failed"
                    );
                }
            }
        }

        info!(
            items = expiring.len(),
            persisted, window_days, "Expiry scan complete"
        );
        Ok(persisted)
    }
}

fn expiry_message(item_name: &str, days_left: i64) -> String {
    match days_left {
        0 => format!("{item_name} utløper i dag."),
        1 => format!("{item_name} utløper i morgen."),
        d => format!("{item_name} utløper om {d} dager."),
    }
}
