//! User entity model.

use chrono::{DateTime, Utc};
use krise_core::types::Coordinates;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address, used as the login name.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// User role.
    pub role: UserRole,
    /// Whether the registration email has been confirmed.
    pub email_confirmed: bool,
    /// Whether login requires an emailed two-factor code.
    pub two_factor_enabled: bool,
    /// Last reported latitude, if the user has shared a position.
    pub latitude: Option<f64>,
    /// Last reported longitude, if the user has shared a position.
    pub longitude: Option<f64>,
    /// The household this user belongs to, if any.
    pub household_id: Option<Uuid>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The user's last known position, if both coordinates are set.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if this user belongs to a household.
    pub fn has_household(&self) -> bool {
        self.household_id.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Full name.
    pub full_name: String,
    /// Assigned role.
    pub role: UserRole,
}
