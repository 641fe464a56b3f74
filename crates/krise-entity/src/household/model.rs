//! Household entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A household grouping registered users and unregistered members.
///
/// `member_count` is a denormalized cache of registered plus unregistered
/// members; every membership mutation recounts it inside the same
/// transaction so it never drifts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Household {
    /// Unique household identifier.
    pub id: Uuid,
    /// Household name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// The owning user. Always a current member.
    pub owner_id: Uuid,
    /// Cached member count (registered users + unregistered members).
    pub member_count: i32,
    /// When the household was created.
    pub created_at: DateTime<Utc>,
    /// When the household was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHousehold {
    /// Household name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// The creating user, who becomes owner and sole member.
    pub owner_id: Uuid,
}
