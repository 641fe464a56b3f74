//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of event produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A membership request event (sent, accepted, ...).
    MembershipRequest,
    /// A geo-radius incident alert.
    Incident,
    /// A storage item nearing expiry.
    StockControl,
    /// A household-level event (member joined, left, ...).
    Household,
    /// A general informational message.
    Info,
}

impl NotificationKind {
    /// Return the kind as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MembershipRequest => "MEMBERSHIP_REQUEST",
            Self::Incident => "INCIDENT",
            Self::StockControl => "STOCK_CONTROL",
            Self::Household => "HOUSEHOLD",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
