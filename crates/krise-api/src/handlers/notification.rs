//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_entity::notification::Notification;

use crate::dto::request::{BroadcastRequest, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Notification>>>, AppError> {
    let notifications = state.notification_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Notification marked as read",
    ))))
}

/// POST /api/notifications/broadcast — admin
pub async fn broadcast(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let req = validated(req)?;
    state
        .notification_service
        .broadcast(&auth, &req.message)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Broadcast sent"))))
}
