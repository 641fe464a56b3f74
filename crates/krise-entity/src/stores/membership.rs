//! Membership request persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::membership::{MembershipRequest, NewMembershipRequest, RequestKind, RequestStatus};

/// Lookup and mutation of membership requests.
#[async_trait]
pub trait MembershipRequestStore: Send + Sync {
    async fn create(&self, request: NewMembershipRequest) -> AppResult<MembershipRequest>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipRequest>>;

    /// Transition a request out of PENDING.
    ///
    /// Returns `false` if the request was not found or already terminal;
    /// terminal states are immutable at the store level, not just in the
    /// service.
    async fn update_status(&self, id: Uuid, status: RequestStatus) -> AppResult<bool>;

    /// Cancel every other PENDING request that involves `user_id` as sender
    /// or receiver. Returns the number of requests canceled.
    async fn cancel_other_pending_for_user(
        &self,
        user_id: Uuid,
        except: Uuid,
    ) -> AppResult<u64>;

    /// The PENDING request of `kind` between this household and user, if one
    /// exists. Used for duplicate guards.
    async fn find_active_between(
        &self,
        household_id: Uuid,
        user_id: Uuid,
        kind: RequestKind,
    ) -> AppResult<Option<MembershipRequest>>;

    async fn find_by_receiver(
        &self,
        receiver_id: Uuid,
        kind: RequestKind,
        status: RequestStatus,
    ) -> AppResult<Vec<MembershipRequest>>;

    async fn find_by_household(
        &self,
        household_id: Uuid,
        kind: RequestKind,
        statuses: &[RequestStatus],
    ) -> AppResult<Vec<MembershipRequest>>;

    /// Remove every request referencing a household. Part of the
    /// household-delete cascade. Returns the number deleted.
    async fn delete_by_household(&self, household_id: Uuid) -> AppResult<u64>;
}
