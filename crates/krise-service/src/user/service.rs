//! Profile reads and live position sharing within a household.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::PushChannel;
use krise_core::types::Coordinates;
use krise_entity::stores::UserDirectory;
use krise_entity::user::User;

use crate::context::RequestContext;

/// A household member's last shared position.
#[derive(Debug, Clone, Serialize)]
pub struct MemberPosition {
    pub user_id: Uuid,
    pub full_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Profile lookups and position updates.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserDirectory>,
    push: Arc<dyn PushChannel>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserDirectory>, push: Arc<dyn PushChannel>) -> Self {
        Self { users, push }
    }

    /// The caller's own profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.require_user(ctx.user_id).await
    }

    /// Stores the caller's position and pushes it to their household's
    /// position topic. Push delivery is best-effort; the stored position is
    /// what the incident fan-out uses.
    pub async fn update_position(
        &self,
        ctx: &RequestContext,
        position: Coordinates,
    ) -> AppResult<()> {
        if !(-90.0..=90.0).contains(&position.latitude)
            || !(-180.0..=180.0).contains(&position.longitude)
        {
            return Err(AppError::validation("Coordinates out of range"));
        }

        self.users.update_position(ctx.user_id, position).await?;

        let user = self.require_user(ctx.user_id).await?;
        if let Some(household_id) = user.household_id {
            let payload = serde_json::json!({
                "type": "POSITION",
                "user_id": user.id,
                "full_name": user.full_name,
                "latitude": position.latitude,
                "longitude": position.longitude,
            });
            if let Err(e) = self
                .push
                .send_to_topic(&position_topic(household_id), payload)
                .await
            {
                warn!(user_id = %user.id, error = %e, "Position push failed");
            }
        }
        Ok(())
    }

    /// Last known positions of everyone in the caller's household. Members
    /// who never shared a position are omitted.
    pub async fn household_positions(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<MemberPosition>> {
        let user = self.require_user(ctx.user_id).await?;
        let household_id = user
            .household_id
            .ok_or_else(|| AppError::validation("You do not belong to a household"))?;

        let members = self.users.find_by_household(household_id).await?;
        Ok(members
            .into_iter()
            .filter_map(|m| {
                let position = m.coordinates()?;
                Some(MemberPosition {
                    user_id: m.id,
                    full_name: m.full_name,
                    latitude: position.latitude,
                    longitude: position.longitude,
                })
            })
            .collect())
    }

    async fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

/// The WebSocket topic carrying a household's live positions.
pub fn position_topic(household_id: Uuid) -> String {
    format!("position:{household_id}")
}
