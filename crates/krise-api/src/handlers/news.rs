//! News feed handlers.

use axum::Json;
use axum::extract::{Query, State};

use krise_core::error::AppError;
use krise_core::types::PageResponse;
use krise_entity::news::{NewNewsArticle, NewsArticle};

use crate::dto::request::{NewsRequest, validated};
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/news?page=&page_size=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<NewsArticle>>>, AppError> {
    let page = state.news_service.list(params.into_page_request()).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/news — admin
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewsRequest>,
) -> Result<Json<ApiResponse<NewsArticle>>, AppError> {
    let req = validated(req)?;
    let article = state
        .news_service
        .publish(
            &auth,
            NewNewsArticle {
                title: req.title,
                content: req.content,
                url: req.url,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}
