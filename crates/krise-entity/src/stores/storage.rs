//! Storage inventory persistence contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use krise_core::AppResult;
use uuid::Uuid;

use crate::storage::{ExpiringItem, StorageItem};

/// Read access to household storage inventories.
///
/// Full storage CRUD lives outside this service; this contract covers the
/// household listing and the expiry scan.
#[async_trait]
pub trait StorageStore: Send + Sync {
    /// A household's current inventory.
    async fn find_by_household(&self, household_id: Uuid) -> AppResult<Vec<StorageItem>>;

    /// Items whose expiry date falls inside `[from, to]`, across all
    /// households. Items without an expiry date are never returned.
    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<ExpiringItem>>;
}
