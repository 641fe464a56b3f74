//! Unregistered household member entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A household member tracked by name only, without a system account.
///
/// Counts toward the household's member count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UnregisteredMember {
    /// Unique identifier.
    pub id: Uuid,
    /// The household this member belongs to.
    pub household_id: Uuid,
    /// Full name.
    pub full_name: String,
    /// When the member was added.
    pub created_at: DateTime<Utc>,
}
