//! Scenario handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_entity::incident::{NewScenario, Scenario};

use crate::dto::request::{ScenarioRequest, validated};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/scenarios
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Scenario>>>, AppError> {
    let scenarios = state.scenario_service.list().await?;
    Ok(Json(ApiResponse::ok(scenarios)))
}

/// GET /api/scenarios/{id}
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Scenario>>, AppError> {
    let scenario = state.scenario_service.get(id).await?;
    Ok(Json(ApiResponse::ok(scenario)))
}

/// POST /api/scenarios — admin
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScenarioRequest>,
) -> Result<Json<ApiResponse<Scenario>>, AppError> {
    let req = validated(req)?;
    let scenario = state
        .scenario_service
        .create(&auth, to_new_scenario(req))
        .await?;
    Ok(Json(ApiResponse::ok(scenario)))
}

/// PUT /api/scenarios/{id} — admin
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ScenarioRequest>,
) -> Result<Json<ApiResponse<Scenario>>, AppError> {
    let req = validated(req)?;
    let scenario = state
        .scenario_service
        .update(&auth, id, to_new_scenario(req))
        .await?;
    Ok(Json(ApiResponse::ok(scenario)))
}

fn to_new_scenario(req: ScenarioRequest) -> NewScenario {
    NewScenario {
        name: req.name,
        description: req.description,
        instructions: req.instructions,
        icon_name: req.icon_name,
    }
}
