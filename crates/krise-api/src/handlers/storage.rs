//! Storage inventory handlers.

use axum::Json;
use axum::extract::State;

use krise_core::error::AppError;
use krise_entity::storage::StorageItem;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/storage
pub async fn household_storage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<StorageItem>>>, AppError> {
    let items = state.storage_service.household_storage(&auth).await?;
    Ok(Json(ApiResponse::ok(items)))
}
