//! Membership request handlers: invitations and join requests.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_entity::membership::MembershipRequest;

use crate::dto::request::{InviteRequest, JoinHouseholdRequest, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/memberships/invitations
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InviteRequest>,
) -> Result<Json<ApiResponse<MembershipRequest>>, AppError> {
    let req = validated(req)?;
    let request = state
        .membership_service
        .send_invitation(&auth, &req.email)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/memberships/join-requests
pub async fn request_join(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<JoinHouseholdRequest>,
) -> Result<Json<ApiResponse<MembershipRequest>>, AppError> {
    let request = state
        .membership_service
        .send_join_request(&auth, req.household_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/memberships/invitations/{request_id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .membership_service
        .accept_invitation(&auth, request_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Invitation accepted",
    ))))
}

/// POST /api/memberships/join-requests/{request_id}/accept
pub async fn accept_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .membership_service
        .accept_join_request(&auth, request_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Join request accepted",
    ))))
}

/// POST /api/memberships/{request_id}/decline
pub async fn decline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .membership_service
        .decline_request(&auth, request_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Request declined",
    ))))
}

/// POST /api/memberships/{request_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .membership_service
        .cancel_request(&auth, request_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Request canceled",
    ))))
}

/// GET /api/memberships/invitations/received
pub async fn received_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MembershipRequest>>>, AppError> {
    let requests = state.membership_service.received_invitations(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/memberships/join-requests/pending
pub async fn household_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MembershipRequest>>>, AppError> {
    let requests = state
        .membership_service
        .household_join_requests(&auth)
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/memberships/join-requests/accepted
pub async fn household_accepted_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MembershipRequest>>>, AppError> {
    let requests = state
        .membership_service
        .household_accepted_join_requests(&auth)
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/memberships/invitations/sent
pub async fn household_sent_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MembershipRequest>>>, AppError> {
    let requests = state
        .membership_service
        .household_sent_invitations(&auth)
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}
