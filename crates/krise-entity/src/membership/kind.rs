//! Membership request kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a request was initiated by the household or by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    /// A user asks to join a household.
    JoinRequest,
    /// A household member invites a user to join.
    Invitation,
}

impl RequestKind {
    /// Return the kind as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JoinRequest => "JOIN_REQUEST",
            Self::Invitation => "INVITATION",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
