//! Membership request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::RequestKind;
use super::status::RequestStatus;

/// A pending proposal linking a user and a household.
///
/// For an invitation the sender is the inviting household member and the
/// receiver the invitee; for a join request the sender is the requesting
/// user and the receiver the household owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The household the request concerns.
    pub household_id: Uuid,
    /// The user who initiated the request.
    pub sender_id: Uuid,
    /// The user expected to resolve the request.
    pub receiver_id: Uuid,
    /// Invitation or join request.
    pub kind: RequestKind,
    /// Current lifecycle state.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl MembershipRequest {
    /// The user who would join the household if this request is accepted.
    pub fn joining_user_id(&self) -> Uuid {
        match self.kind {
            RequestKind::Invitation => self.receiver_id,
            RequestKind::JoinRequest => self.sender_id,
        }
    }
}

/// Data required to create a new membership request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMembershipRequest {
    /// The household the request concerns.
    pub household_id: Uuid,
    /// The initiating user.
    pub sender_id: Uuid,
    /// The resolving user.
    pub receiver_id: Uuid,
    /// Invitation or join request.
    pub kind: RequestKind,
}
