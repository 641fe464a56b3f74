//! Incident handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_entity::incident::{Incident, NewIncident, UpdateIncident};

use crate::dto::request::{CreateIncidentRequest, UpdateIncidentRequest, validated};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/incidents
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Incident>>>, AppError> {
    let incidents = state.incident_service.list().await?;
    Ok(Json(ApiResponse::ok(incidents)))
}

/// GET /api/incidents/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    let incident = state.incident_service.get(id).await?;
    Ok(Json(ApiResponse::ok(incident)))
}

/// POST /api/incidents — admin
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateIncidentRequest>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    let req = validated(req)?;
    let incident = state
        .incident_service
        .create(
            &auth,
            NewIncident {
                name: req.name,
                description: req.description,
                latitude: req.latitude,
                longitude: req.longitude,
                impact_radius_km: req.impact_radius_km,
                severity: req.severity,
                started_at: req.started_at,
                scenario_id: req.scenario_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(incident)))
}

/// PUT /api/incidents/{id} — admin
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateIncidentRequest>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    let req = validated(req)?;
    let incident = state
        .incident_service
        .update(
            &auth,
            id,
            UpdateIncident {
                name: req.name,
                description: req.description,
                latitude: req.latitude,
                longitude: req.longitude,
                impact_radius_km: req.impact_radius_km,
                severity: req.severity,
                ended_at: req.ended_at,
                scenario_id: req.scenario_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(incident)))
}

/// DELETE /api/incidents/{id} — admin
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.incident_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Incident deleted",
    ))))
}
