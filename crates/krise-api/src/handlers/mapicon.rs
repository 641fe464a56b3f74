//! Map icon handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::types::Coordinates;
use krise_entity::mapicon::{MapIcon, NewMapIcon};

use crate::dto::request::{ClosestIconQuery, MapIconRequest, RadiusQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/map-icons
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<MapIcon>>>, AppError> {
    let icons = state.mapicon_service.list().await?;
    Ok(Json(ApiResponse::ok(icons)))
}

/// GET /api/map-icons/nearby?latitude=&longitude=&radius_km=
pub async fn nearby(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RadiusQuery>,
) -> Result<Json<ApiResponse<Vec<MapIcon>>>, AppError> {
    let icons = state
        .mapicon_service
        .within_radius(
            Coordinates::new(query.latitude, query.longitude),
            query.radius_km,
        )
        .await?;
    Ok(Json(ApiResponse::ok(icons)))
}

/// GET /api/map-icons/closest?latitude=&longitude=&kind=
pub async fn closest(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ClosestIconQuery>,
) -> Result<Json<ApiResponse<Option<MapIcon>>>, AppError> {
    let icon = state
        .mapicon_service
        .closest(Coordinates::new(query.latitude, query.longitude), query.kind)
        .await?;
    Ok(Json(ApiResponse::ok(icon)))
}

/// POST /api/map-icons — admin
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MapIconRequest>,
) -> Result<Json<ApiResponse<MapIcon>>, AppError> {
    let icon = state
        .mapicon_service
        .create(&auth, to_new_icon(req))
        .await?;
    Ok(Json(ApiResponse::ok(icon)))
}

/// PUT /api/map-icons/{id} — admin
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MapIconRequest>,
) -> Result<Json<ApiResponse<MapIcon>>, AppError> {
    let icon = state
        .mapicon_service
        .update(&auth, id, to_new_icon(req))
        .await?;
    Ok(Json(ApiResponse::ok(icon)))
}

/// DELETE /api/map-icons/{id} — admin
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.mapicon_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Icon deleted"))))
}

fn to_new_icon(req: MapIconRequest) -> NewMapIcon {
    NewMapIcon {
        kind: req.kind,
        latitude: req.latitude,
        longitude: req.longitude,
        address: req.address,
        description: req.description,
        opening_hours: req.opening_hours,
        contact_info: req.contact_info,
    }
}
