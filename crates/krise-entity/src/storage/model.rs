//! Storage item entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An item in a household's emergency storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StorageItem {
    /// Unique identifier.
    pub id: Uuid,
    /// The owning household.
    pub household_id: Uuid,
    /// Item name.
    pub item_name: String,
    /// Unit of measure (liters, cans, ...).
    pub unit: String,
    /// Quantity on hand.
    pub amount: f64,
    /// Expiry date, if the item expires.
    pub expiration: Option<DateTime<Utc>>,
    /// When the item was added.
    pub date_added: DateTime<Utc>,
}

/// A storage item joined with its expiry date, as surfaced by the daily
/// expiry scan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExpiringItem {
    /// The storage item record.
    pub id: Uuid,
    /// The owning household.
    pub household_id: Uuid,
    /// Item name, used in the notification message.
    pub item_name: String,
    /// When the item expires.
    pub expiration: DateTime<Utc>,
}
