//! Household persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::household::{Household, NewHousehold, UnregisteredMember};

/// Lookup and mutation of the household aggregate.
///
/// Every mutation that changes membership recounts `member_count`
/// (registered users plus unregistered members) inside the same transaction
/// as the membership change, so the cached count never drifts.
#[async_trait]
pub trait HouseholdStore: Send + Sync {
    /// Create a household. Atomically sets the owner's household reference
    /// and a member count of 1. Fails with Validation if the owner already
    /// belongs to a household.
    async fn create(&self, household: NewHousehold) -> AppResult<Household>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Household>>;

    /// Case-insensitive substring search on the household name.
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Household>>;

    /// Update name and address.
    async fn update_details(&self, id: Uuid, name: &str, address: &str) -> AppResult<Household>;

    /// Atomically assign a user to the household and recount members.
    ///
    /// Locks both rows, fails with Validation if the user already belongs to
    /// a household (the join race loser) or either record is missing.
    async fn add_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Atomically clear the user's household reference and recount members.
    async fn remove_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Transfer ownership to another registered member.
    async fn change_owner(&self, household_id: Uuid, new_owner_id: Uuid) -> AppResult<()>;

    /// Delete the household: clears every member's household reference and
    /// deletes all unregistered members in the same transaction as the row
    /// itself. Membership requests are removed separately through
    /// [`MembershipRequestStore::delete_by_household`].
    ///
    /// [`MembershipRequestStore::delete_by_household`]:
    ///     crate::stores::MembershipRequestStore::delete_by_household
    async fn delete_cascade(&self, household_id: Uuid) -> AppResult<()>;

    /// Add an unregistered member and recount.
    async fn add_unregistered(
        &self,
        household_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember>;

    /// Rename an unregistered member.
    async fn update_unregistered(
        &self,
        member_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember>;

    /// Remove an unregistered member and recount.
    async fn remove_unregistered(&self, member_id: Uuid) -> AppResult<()>;

    async fn find_unregistered_by_id(
        &self,
        member_id: Uuid,
    ) -> AppResult<Option<UnregisteredMember>>;

    async fn find_unregistered(&self, household_id: Uuid) -> AppResult<Vec<UnregisteredMember>>;
}
