//! User profile and position handlers.

use axum::Json;
use axum::extract::State;

use krise_core::error::AppError;
use krise_core::types::Coordinates;
use krise_entity::user::User;
use krise_service::MemberPosition;

use crate::dto::request::PositionRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me/position
pub async fn update_position(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PositionRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .user_service
        .update_position(&auth, Coordinates::new(req.latitude, req.longitude))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Position updated",
    ))))
}

/// GET /api/users/household-positions
pub async fn household_positions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MemberPosition>>>, AppError> {
    let positions = state.user_service.household_positions(&auth).await?;
    Ok(Json(ApiResponse::ok(positions)))
}
