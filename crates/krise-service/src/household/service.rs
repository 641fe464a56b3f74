//! Household lifecycle: create, membership, ownership, cascade delete.
//!
//! The member-count invariant (count == registered + unregistered) is
//! enforced by the store's recount-on-write; this service enforces the
//! ownership rules on top of it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_entity::household::{Household, NewHousehold, UnregisteredMember};
use krise_entity::notification::NotificationKind;
use krise_entity::stores::{HouseholdStore, MembershipRequestStore, UserDirectory};
use krise_entity::user::User;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Minimal public view of a household for id-based search.
///
/// Deliberately omits address and owner so non-members browsing by id
/// learn nothing beyond the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdSummary {
    pub id: Uuid,
    pub name: String,
}

/// Full household view for members.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdDetails {
    pub household: Household,
    pub members: Vec<User>,
    pub unregistered_members: Vec<UnregisteredMember>,
}

/// Enforces the household aggregate's invariants across all mutations.
#[derive(Clone)]
pub struct HouseholdService {
    households: Arc<dyn HouseholdStore>,
    users: Arc<dyn UserDirectory>,
    requests: Arc<dyn MembershipRequestStore>,
    notifications: NotificationService,
}

impl HouseholdService {
    /// Creates a new household service.
    pub fn new(
        households: Arc<dyn HouseholdStore>,
        users: Arc<dyn UserDirectory>,
        requests: Arc<dyn MembershipRequestStore>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            households,
            users,
            requests,
            notifications,
        }
    }

    /// Creates a household with the caller as owner and sole member.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        address: &str,
    ) -> AppResult<Household> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Household name must not be empty"));
        }

        let household = self
            .households
            .create(NewHousehold {
                name: name.trim().to_string(),
                address: address.trim().to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(household_id = %household.id, owner_id = %ctx.user_id, "Household created");
        Ok(household)
    }

    /// The caller's household with members and unregistered members.
    pub async fn my_household(&self, ctx: &RequestContext) -> AppResult<HouseholdDetails> {
        let household = self.require_membership(ctx).await?;
        let members = self.users.find_by_household(household.id).await?;
        let unregistered_members = self.households.find_unregistered(household.id).await?;

        Ok(HouseholdDetails {
            household,
            members,
            unregistered_members,
        })
    }

    /// Renames or re-addresses the household. Owner only.
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        name: &str,
        address: &str,
    ) -> AppResult<Household> {
        let household = self.require_ownership(ctx).await?;
        self.households
            .update_details(household.id, name.trim(), address.trim())
            .await
    }

    /// The caller leaves their household. The owner cannot leave; ownership
    /// must be transferred or the household deleted first.
    pub async fn leave(&self, ctx: &RequestContext) -> AppResult<()> {
        let household = self.require_membership(ctx).await?;
        if household.owner_id == ctx.user_id {
            return Err(AppError::validation(
                "The owner cannot leave. Transfer ownership or delete the household first.",
            ));
        }

        self.households
            .remove_member(household.id, ctx.user_id)
            .await?;

        let user = self.require_user(ctx.user_id).await?;
        self.notifications
            .notify_household(
                household.id,
                NotificationKind::Household,
                &format!("{} har forlatt husstanden.", user.full_name),
            )
            .await?;
        Ok(())
    }

    /// Removes a registered member. Owner only; the owner cannot remove
    /// themselves this way.
    pub async fn remove_member(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<()> {
        let household = self.require_ownership(ctx).await?;
        if user_id == ctx.user_id {
            return Err(AppError::validation(
                "The owner cannot remove themselves. Transfer ownership or delete the household.",
            ));
        }

        self.households.remove_member(household.id, user_id).await
    }

    /// Transfers ownership to another registered member. Owner only.
    pub async fn change_owner(&self, ctx: &RequestContext, new_owner_id: Uuid) -> AppResult<()> {
        let household = self.require_ownership(ctx).await?;
        self.households
            .change_owner(household.id, new_owner_id)
            .await?;

        info!(
            household_id = %household.id,
            old_owner = %ctx.user_id,
            new_owner = %new_owner_id,
            "Household ownership transferred"
        );
        Ok(())
    }

    /// Deletes the household. Owner only. Cascades: membership requests are
    /// removed, every member's reference is cleared, unregistered members
    /// are deleted.
    pub async fn delete(&self, ctx: &RequestContext) -> AppResult<()> {
        let household = self.require_ownership(ctx).await?;

        let removed = self.requests.delete_by_household(household.id).await?;
        self.households.delete_cascade(household.id).await?;

        info!(
            household_id = %household.id,
            requests_removed = removed,
            "Household deleted"
        );
        Ok(())
    }

    /// Adds an unregistered member to the caller's household.
    pub async fn add_unregistered_member(
        &self,
        ctx: &RequestContext,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        let household = self.require_membership(ctx).await?;
        if full_name.trim().is_empty() {
            return Err(AppError::validation("Member name must not be empty"));
        }
        self.households
            .add_unregistered(household.id, full_name.trim())
            .await
    }

    /// Renames an unregistered member of the caller's household.
    pub async fn edit_unregistered_member(
        &self,
        ctx: &RequestContext,
        member_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        self.require_unregistered_in_household(ctx, member_id).await?;
        if full_name.trim().is_empty() {
            return Err(AppError::validation("Member name must not be empty"));
        }
        self.households
            .update_unregistered(member_id, full_name.trim())
            .await
    }

    /// Removes an unregistered member from the caller's household.
    pub async fn remove_unregistered_member(
        &self,
        ctx: &RequestContext,
        member_id: Uuid,
    ) -> AppResult<()> {
        self.require_unregistered_in_household(ctx, member_id).await?;
        self.households.remove_unregistered(member_id).await
    }

    /// Id-based lookup returning only id and name.
    pub async fn search_by_id(&self, household_id: Uuid) -> AppResult<HouseholdSummary> {
        let household = self
            .households
            .find_by_id(household_id)
            .await?
            .ok_or_else(|| AppError::not_found("Household not found"))?;

        Ok(HouseholdSummary {
            id: household.id,
            name: household.name,
        })
    }

    /// Name search returning the same minimal view as [`Self::search_by_id`].
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<HouseholdSummary>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }
        let households = self.households.find_by_name(name).await?;
        Ok(households
            .into_iter()
            .map(|h| HouseholdSummary {
                id: h.id,
                name: h.name,
            })
            .collect())
    }

    async fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::validation("User not found"))
    }

    /// The caller's household, or Validation if they have none.
    async fn require_membership(&self, ctx: &RequestContext) -> AppResult<Household> {
        let user = self.require_user(ctx.user_id).await?;
        let household_id = user
            .household_id
            .ok_or_else(|| AppError::validation("You do not belong to a household"))?;
        self.households
            .find_by_id(household_id)
            .await?
            .ok_or_else(|| AppError::validation("Household not found"))
    }

    /// The caller's household, requiring that they own it.
    async fn require_ownership(&self, ctx: &RequestContext) -> AppResult<Household> {
        let household = self.require_membership(ctx).await?;
        if household.owner_id != ctx.user_id {
            return Err(AppError::validation(
                "Only the household owner may do this",
            ));
        }
        Ok(household)
    }

    async fn require_unregistered_in_household(
        &self,
        ctx: &RequestContext,
        member_id: Uuid,
    ) -> AppResult<()> {
        let household = self.require_membership(ctx).await?;
        let member = self
            .households
            .find_unregistered_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::not_found("Unregistered member not found"))?;
        if member.household_id != household.id {
            return Err(AppError::validation(
                "Member does not belong to your household",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx_for, fake_user_at, TestWorld};

    #[tokio::test]
    async fn test_create_sets_owner_and_count() {
        let w = TestWorld::new();
        let user = w.users.add(fake_user_at(None));

        let household = w
            .household
            .create(&ctx_for(&user), "Hjemme", "Storgata 1")
            .await
            .unwrap();

        assert_eq!(household.owner_id, user.id);
        assert_eq!(household.member_count, 1);
        assert_eq!(w.users.get(user.id).household_id, Some(household.id));
    }

    #[tokio::test]
    async fn test_create_fails_if_already_in_household() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let err = w
            .household
            .create(&ctx_for(&owner), "Nummer to", "Gata 2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_member_count_tracks_unregistered_members() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let ctx = ctx_for(&owner);
        let household_id = w.users.get(owner.id).household_id.unwrap();

        let member = w
            .household
            .add_unregistered_member(&ctx, "Bestemor")
            .await
            .unwrap();
        assert_eq!(w.households.get(household_id).member_count, 2);

        w.household
            .remove_unregistered_member(&ctx, member.id)
            .await
            .unwrap();
        assert_eq!(w.households.get(household_id).member_count, 1);
    }

    #[tokio::test]
    async fn test_owner_cannot_leave() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let err = w.household.leave(&ctx_for(&owner)).await.unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_member_leave_recounts() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let member = w.users.add(fake_user_at(None));
        let household_id = w.users.get(owner.id).household_id.unwrap();
        w.join(household_id, member.id);

        w.household.leave(&ctx_for(&member)).await.unwrap();

        assert_eq!(w.users.get(member.id).household_id, None);
        assert_eq!(w.households.get(household_id).member_count, 1);
    }

    #[tokio::test]
    async fn test_change_owner_requires_member_target() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let outsider = w.users.add(fake_user_at(None));

        let err = w
            .household
            .change_owner(&ctx_for(&owner), outsider.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_transfer_then_old_owner_cannot_delete() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let member = w.users.add(fake_user_at(None));
        let household_id = w.users.get(owner.id).household_id.unwrap();
        w.join(household_id, member.id);

        w.household
            .change_owner(&ctx_for(&owner), member.id)
            .await
            .unwrap();

        // The original owner lost the right to delete.
        let err = w.household.delete(&ctx_for(&owner)).await.unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);

        // The new owner can delete, and the cascade clears everything.
        w.household.delete(&ctx_for(&member)).await.unwrap();
        assert_eq!(w.users.get(owner.id).household_id, None);
        assert_eq!(w.users.get(member.id).household_id, None);
    }

    #[tokio::test]
    async fn test_delete_cascades_requests_and_unregistered() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let ctx = ctx_for(&owner);
        let household_id = w.users.get(owner.id).household_id.unwrap();

        w.household
            .add_unregistered_member(&ctx, "Bestefar")
            .await
            .unwrap();
        let candidate = w.users.add(fake_user_at(None));
        let request = w
            .membership
            .send_invitation(&ctx, &candidate.email)
            .await
            .unwrap();

        w.household.delete(&ctx).await.unwrap();

        assert!(w.requests.try_get(request.id).is_none());
        assert!(w.households.try_get(household_id).is_none());
        assert!(w.households.unregistered_for(household_id).is_empty());
        assert_eq!(w.users.get(owner.id).household_id, None);
    }

    #[tokio::test]
    async fn test_search_by_id_exposes_only_id_and_name() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let household_id = w.users.get(owner.id).household_id.unwrap();

        let summary = w.household.search_by_id(household_id).await.unwrap();
        assert_eq!(summary.id, household_id);
        assert_eq!(summary.name, "Hjemme");
    }

    #[tokio::test]
    async fn test_search_by_name_matches_case_insensitively() {
        let w = TestWorld::new();
        w.user_with_household("Solbakken");
        w.user_with_household("Fjellveien");

        let hits = w.household.search_by_name("solbak").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Solbakken");

        let err = w.household.search_by_name("  ").await.unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }
}
