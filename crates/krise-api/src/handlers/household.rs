//! Household handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_entity::household::{Household, UnregisteredMember};
use krise_service::{HouseholdDetails, HouseholdSummary};

use crate::dto::request::{ChangeOwnerRequest, HouseholdRequest, UnregisteredMemberRequest, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/households
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<HouseholdRequest>,
) -> Result<Json<ApiResponse<Household>>, AppError> {
    let req = validated(req)?;
    let household = state
        .household_service
        .create(&auth, &req.name, &req.address)
        .await?;
    Ok(Json(ApiResponse::ok(household)))
}

/// GET /api/households/mine
pub async fn my_household(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<HouseholdDetails>>, AppError> {
    let details = state.household_service.my_household(&auth).await?;
    Ok(Json(ApiResponse::ok(details)))
}

/// PUT /api/households/mine
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<HouseholdRequest>,
) -> Result<Json<ApiResponse<Household>>, AppError> {
    let req = validated(req)?;
    let household = state
        .household_service
        .update_details(&auth, &req.name, &req.address)
        .await?;
    Ok(Json(ApiResponse::ok(household)))
}

/// POST /api/households/mine/leave
pub async fn leave(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.household_service.leave(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "You have left the household",
    ))))
}

/// DELETE /api/households/mine/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.household_service.remove_member(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}

/// PUT /api/households/mine/owner
pub async fn change_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangeOwnerRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .household_service
        .change_owner(&auth, req.new_owner_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Ownership transferred",
    ))))
}

/// DELETE /api/households/mine
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.household_service.delete(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Household deleted",
    ))))
}

/// POST /api/households/mine/unregistered
pub async fn add_unregistered(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UnregisteredMemberRequest>,
) -> Result<Json<ApiResponse<UnregisteredMember>>, AppError> {
    let req = validated(req)?;
    let member = state
        .household_service
        .add_unregistered_member(&auth, &req.full_name)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// PUT /api/households/mine/unregistered/{member_id}
pub async fn edit_unregistered(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<Uuid>,
    Json(req): Json<UnregisteredMemberRequest>,
) -> Result<Json<ApiResponse<UnregisteredMember>>, AppError> {
    let req = validated(req)?;
    let member = state
        .household_service
        .edit_unregistered_member(&auth, member_id, &req.full_name)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/households/mine/unregistered/{member_id}
pub async fn remove_unregistered(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .household_service
        .remove_unregistered_member(&auth, member_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed"))))
}

/// `?name=` query for household name search.
#[derive(Debug, serde::Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// GET /api/households/search?name=
pub async fn search_by_name(
    State(state): State<AppState>,
    _auth: AuthUser,
    axum::extract::Query(query): axum::extract::Query<NameQuery>,
) -> Result<Json<ApiResponse<Vec<HouseholdSummary>>>, AppError> {
    let summaries = state.household_service.search_by_name(&query.name).await?;
    Ok(Json(ApiResponse::ok(summaries)))
}

/// GET /api/households/{household_id}
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(household_id): Path<Uuid>,
) -> Result<Json<ApiResponse<HouseholdSummary>>, AppError> {
    let summary = state.household_service.search_by_id(household_id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
