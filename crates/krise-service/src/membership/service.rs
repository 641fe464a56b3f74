//! Membership request lifecycle: PENDING -> ACCEPTED | REJECTED | CANCELED.
//!
//! Acceptance is serialized through `HouseholdStore::add_member`, which
//! locks the user row: of two households accepting the same user
//! concurrently, exactly one add succeeds and the loser fails with a
//! Validation error before its request leaves PENDING.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_entity::household::Household;
use krise_entity::membership::{
    MembershipRequest, NewMembershipRequest, RequestKind, RequestStatus,
};
use krise_entity::notification::NotificationKind;
use krise_entity::stores::{HouseholdStore, MembershipRequestStore, UserDirectory};
use krise_entity::user::User;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Orchestrates invitations and join requests.
#[derive(Clone)]
pub struct MembershipRequestService {
    requests: Arc<dyn MembershipRequestStore>,
    households: Arc<dyn HouseholdStore>,
    users: Arc<dyn UserDirectory>,
    notifications: NotificationService,
}

impl MembershipRequestService {
    /// Creates a new membership request service.
    pub fn new(
        requests: Arc<dyn MembershipRequestStore>,
        households: Arc<dyn HouseholdStore>,
        users: Arc<dyn UserDirectory>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            requests,
            households,
            users,
            notifications,
        }
    }

    /// Invites another user into the caller's household.
    pub async fn send_invitation(
        &self,
        ctx: &RequestContext,
        invitee_email: &str,
    ) -> AppResult<MembershipRequest> {
        let caller = self.require_user(ctx.user_id).await?;
        let household_id = caller
            .household_id
            .ok_or_else(|| AppError::validation("You must belong to a household to invite"))?;

        let invitee = self
            .users
            .find_by_email(invitee_email)
            .await?
            .ok_or_else(|| AppError::not_found("No user with that email"))?;

        if invitee.household_id.is_some() {
            return Err(AppError::validation(
                "User already belongs to a household",
            ));
        }
        if self
            .requests
            .find_active_between(household_id, invitee.id, RequestKind::Invitation)
            .await?
            .is_some()
        {
            return Err(AppError::validation(
                "An invitation to this user is already pending",
            ));
        }

        let request = self
            .requests
            .create(NewMembershipRequest {
                household_id,
                sender_id: ctx.user_id,
                receiver_id: invitee.id,
                kind: RequestKind::Invitation,
            })
            .await?;

        let household = self.require_household(household_id).await?;
        self.notifications
            .notify_user(
                invitee.id,
                NotificationKind::MembershipRequest,
                format!("Du har blitt invitert til husstanden {}.", household.name),
            )
            .await?;

        info!(request_id = %request.id, "Invitation sent");
        Ok(request)
    }

    /// Asks to join a household. The household owner receives the request.
    pub async fn send_join_request(
        &self,
        ctx: &RequestContext,
        household_id: Uuid,
    ) -> AppResult<MembershipRequest> {
        let caller = self.require_user(ctx.user_id).await?;
        if caller.household_id.is_some() {
            return Err(AppError::validation("You already belong to a household"));
        }

        let household = self
            .households
            .find_by_id(household_id)
            .await?
            .ok_or_else(|| AppError::validation("Household does not exist"))?;

        if self
            .requests
            .find_active_between(household_id, ctx.user_id, RequestKind::JoinRequest)
            .await?
            .is_some()
        {
            return Err(AppError::validation(
                "A join request to this household is already pending",
            ));
        }

        let request = self
            .requests
            .create(NewMembershipRequest {
                household_id,
                sender_id: ctx.user_id,
                receiver_id: household.owner_id,
                kind: RequestKind::JoinRequest,
            })
            .await?;

        self.notifications
            .notify_user(
                household.owner_id,
                NotificationKind::MembershipRequest,
                format!(
                    "{} ønsker å bli medlem av husstanden {}.",
                    caller.full_name, household.name
                ),
            )
            .await?;

        info!(request_id = %request.id, "Join request sent");
        Ok(request)
    }

    /// Accepts an invitation. Only the invitee may accept.
    pub async fn accept_invitation(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<()> {
        let request = self.require_pending(request_id, RequestKind::Invitation).await?;
        if request.receiver_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the invited user may accept this invitation",
            ));
        }
        self.resolve_accept(request).await
    }

    /// Accepts a join request. Only the household owner may accept.
    pub async fn accept_join_request(
        &self,
        ctx: &RequestContext,
        request_id: Uuid,
    ) -> AppResult<()> {
        let request = self
            .require_pending(request_id, RequestKind::JoinRequest)
            .await?;
        if request.receiver_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the household owner may accept this request",
            ));
        }
        self.resolve_accept(request).await
    }

    /// Declines a request. Only the receiver may decline.
    pub async fn decline_request(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<()> {
        let request = self.require_found(request_id).await?;
        if request.receiver_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the receiver may decline this request",
            ));
        }
        if !self
            .requests
            .update_status(request_id, RequestStatus::Rejected)
            .await?
        {
            return Err(AppError::validation("Request is already resolved"));
        }
        Ok(())
    }

    /// Cancels a request. Only the sender may cancel.
    pub async fn cancel_request(&self, ctx: &RequestContext, request_id: Uuid) -> AppResult<()> {
        let request = self.require_found(request_id).await?;
        if request.sender_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the sender may cancel this request",
            ));
        }
        if !self
            .requests
            .update_status(request_id, RequestStatus::Canceled)
            .await?
        {
            return Err(AppError::validation("Request is already resolved"));
        }
        Ok(())
    }

    /// Pending invitations addressed to the caller.
    pub async fn received_invitations(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MembershipRequest>> {
        self.requests
            .find_by_receiver(ctx.user_id, RequestKind::Invitation, RequestStatus::Pending)
            .await
    }

    /// Pending join requests for the caller's household. Owner only.
    pub async fn household_join_requests(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MembershipRequest>> {
        let household = self.require_owned_household(ctx).await?;
        self.requests
            .find_by_household(
                household.id,
                RequestKind::JoinRequest,
                &[RequestStatus::Pending],
            )
            .await
    }

    /// Accepted join requests for the caller's household. Owner only.
    pub async fn household_accepted_join_requests(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MembershipRequest>> {
        let household = self.require_owned_household(ctx).await?;
        self.requests
            .find_by_household(
                household.id,
                RequestKind::JoinRequest,
                &[RequestStatus::Accepted],
            )
            .await
    }

    /// Pending invitations sent from the caller's household.
    pub async fn household_sent_invitations(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MembershipRequest>> {
        let caller = self.require_user(ctx.user_id).await?;
        let household_id = caller
            .household_id
            .ok_or_else(|| AppError::validation("You do not belong to a household"))?;
        self.requests
            .find_by_household(
                household_id,
                RequestKind::Invitation,
                &[RequestStatus::Pending],
            )
            .await
    }

    /// Shared acceptance path for both request kinds.
    ///
    /// Order matters: the atomic `add_member` is the race arbiter, so a
    /// loser fails before its request leaves PENDING. Once the member is
    /// in, the status flip is guarded by the store's PENDING check; if a
    /// concurrent cancel won that flip, the membership is rolled back.
    async fn resolve_accept(&self, request: MembershipRequest) -> AppResult<()> {
        let joining_user_id = request.joining_user_id();

        self.households
            .add_member(request.household_id, joining_user_id)
            .await?;

        if !self
            .requests
            .update_status(request.id, RequestStatus::Accepted)
            .await?
        {
            self.households
                .remove_member(request.household_id, joining_user_id)
                .await?;
            return Err(AppError::validation("Request is already resolved"));
        }

        let canceled = self
            .requests
            .cancel_other_pending_for_user(joining_user_id, request.id)
            .await?;
        info!(
            request_id = %request.id,
            joining_user_id = %joining_user_id,
            canceled_other = canceled,
            "Membership request accepted"
        );

        if let Some(household) = self.households.find_by_id(request.household_id).await? {
            let joined = self.require_user(joining_user_id).await?;
            self.notifications
                .notify_household(
                    household.id,
                    NotificationKind::Household,
                    &format!("{} er nå medlem av husstanden.", joined.full_name),
                )
                .await?;
        }

        Ok(())
    }

    async fn require_found(&self, request_id: Uuid) -> AppResult<MembershipRequest> {
        self.requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::validation("Membership request not found"))
    }

    async fn require_pending(
        &self,
        request_id: Uuid,
        kind: RequestKind,
    ) -> AppResult<MembershipRequest> {
        let request = self.require_found(request_id).await?;
        if request.kind != kind {
            return Err(AppError::validation("Wrong request type"));
        }
        if request.status != RequestStatus::Pending {
            return Err(AppError::validation("Request is already resolved"));
        }
        Ok(request)
    }

    async fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::validation("User not found"))
    }

    async fn require_household(&self, household_id: Uuid) -> AppResult<Household> {
        self.households
            .find_by_id(household_id)
            .await?
            .ok_or_else(|| AppError::validation("Household not found"))
    }

    async fn require_owned_household(&self, ctx: &RequestContext) -> AppResult<Household> {
        let caller = self.require_user(ctx.user_id).await?;
        let household_id = caller
            .household_id
            .ok_or_else(|| AppError::validation("You do not belong to a household"))?;
        let household = self.require_household(household_id).await?;
        if household.owner_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the household owner may do this",
            ));
        }
        Ok(household)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx_for, fake_user_at, TestWorld};

    #[tokio::test]
    async fn test_invitation_rejected_when_invitee_has_household() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let other_owner = w.user_with_household("Borte");

        let err = w
            .membership
            .send_invitation(&ctx_for(&owner), &other_owner.email)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_duplicate_invitation_rejected() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let invitee = w.users.add(fake_user_at(None));

        w.membership
            .send_invitation(&ctx_for(&owner), &invitee.email)
            .await
            .unwrap();
        let err = w
            .membership
            .send_invitation(&ctx_for(&owner), &invitee.email)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_accept_invitation_assigns_household_and_recounts() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let invitee = w.users.add(fake_user_at(None));

        let request = w
            .membership
            .send_invitation(&ctx_for(&owner), &invitee.email)
            .await
            .unwrap();
        w.membership
            .accept_invitation(&ctx_for(&invitee), request.id)
            .await
            .unwrap();

        let joined = w.users.get(invitee.id);
        assert_eq!(joined.household_id, Some(request.household_id));
        let household = w.households.get(request.household_id);
        assert_eq!(household.member_count, 2);
    }

    #[tokio::test]
    async fn test_second_accept_fails() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let invitee = w.users.add(fake_user_at(None));

        let request = w
            .membership
            .send_invitation(&ctx_for(&owner), &invitee.email)
            .await
            .unwrap();
        w.membership
            .accept_invitation(&ctx_for(&invitee), request.id)
            .await
            .unwrap();

        let err = w
            .membership
            .accept_invitation(&ctx_for(&invitee), request.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_accept_cancels_other_pending_requests() {
        let w = TestWorld::new();
        let owner_a = w.user_with_household("A");
        let owner_b = w.user_with_household("B");
        let candidate = w.users.add(fake_user_at(None));

        let from_a = w
            .membership
            .send_invitation(&ctx_for(&owner_a), &candidate.email)
            .await
            .unwrap();
        let from_b = w
            .membership
            .send_invitation(&ctx_for(&owner_b), &candidate.email)
            .await
            .unwrap();

        w.membership
            .accept_invitation(&ctx_for(&candidate), from_a.id)
            .await
            .unwrap();

        // The other invitation is no longer pending, and accepting it fails.
        assert_eq!(
            w.requests.get(from_b.id).status,
            RequestStatus::Canceled
        );
        let err = w
            .membership
            .accept_invitation(&ctx_for(&candidate), from_b.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_join_request_goes_to_owner_and_accept_works() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let joiner = w.users.add(fake_user_at(None));
        let household_id = w.users.get(owner.id).household_id.unwrap();

        let request = w
            .membership
            .send_join_request(&ctx_for(&joiner), household_id)
            .await
            .unwrap();
        assert_eq!(request.receiver_id, owner.id);

        // A non-owner cannot accept.
        let err = w
            .membership
            .accept_join_request(&ctx_for(&joiner), request.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Authorization);

        w.membership
            .accept_join_request(&ctx_for(&owner), request.id)
            .await
            .unwrap();
        assert_eq!(w.users.get(joiner.id).household_id, Some(household_id));
    }

    #[tokio::test]
    async fn test_decline_and_cancel_are_terminal() {
        let w = TestWorld::new();
        let owner = w.user_with_household("Hjemme");
        let invitee = w.users.add(fake_user_at(None));

        let request = w
            .membership
            .send_invitation(&ctx_for(&owner), &invitee.email)
            .await
            .unwrap();
        w.membership
            .decline_request(&ctx_for(&invitee), request.id)
            .await
            .unwrap();

        // Declined request cannot be canceled or accepted afterwards.
        assert!(w
            .membership
            .cancel_request(&ctx_for(&owner), request.id)
            .await
            .is_err());
        assert!(w
            .membership
            .accept_invitation(&ctx_for(&invitee), request.id)
            .await
            .is_err());
    }
}
