//! User persistence contract.

use async_trait::async_trait;
use krise_core::types::Coordinates;
use krise_core::AppResult;
use uuid::Uuid;

use crate::user::{NewUser, User};

/// Lookup and mutation of user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new user. Fails with a Conflict error if the email is taken.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All registered members of a household.
    async fn find_by_household(&self, household_id: Uuid) -> AppResult<Vec<User>>;

    /// All users whose stored position lies within `radius_km` of `center`.
    ///
    /// Users without a stored position are never returned.
    async fn find_within_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> AppResult<Vec<User>>;

    /// Update the user's last known position.
    async fn update_position(&self, id: Uuid, position: Coordinates) -> AppResult<()>;

    /// Mark the user's email address as confirmed.
    async fn confirm_email(&self, id: Uuid) -> AppResult<()>;

    /// Replace the user's password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Toggle the emailed two-factor requirement for login.
    async fn set_two_factor(&self, id: Uuid, enabled: bool) -> AppResult<()>;
}
