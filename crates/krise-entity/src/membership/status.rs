//! Membership request status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a membership request.
///
/// `Pending` is the only non-terminal state; once a request reaches
/// `Accepted`, `Rejected`, or `Canceled` it never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted; the user joined the household.
    Accepted,
    /// Declined by the receiver.
    Rejected,
    /// Withdrawn by the sender, or voided when the user joined elsewhere.
    Canceled,
}

impl RequestStatus {
    /// Whether the request can still transition.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this state permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Return the status as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_is_active() {
        assert!(RequestStatus::Pending.is_active());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Canceled.is_terminal());
    }
}
