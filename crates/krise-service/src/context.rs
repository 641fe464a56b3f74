//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use krise_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer from the JWT and passed into service methods
/// so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email (convenience field from JWT claims).
    pub email: String,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, role: UserRole) -> Self {
        Self {
            user_id,
            email,
            role,
            request_time: Utc::now(),
        }
    }

    /// Whether the current caller has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
