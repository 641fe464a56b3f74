//! News repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::news::{NewNewsArticle, NewsArticle};
use krise_entity::stores::NewsStore;

/// PostgreSQL-backed news store.
#[derive(Debug, Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsStore for NewsRepository {
    async fn create(&self, article: NewNewsArticle) -> AppResult<NewsArticle> {
        sqlx::query_as::<_, NewsArticle>(
            "INSERT INTO news (title, content, url) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create article", e))
    }

    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<Vec<NewsArticle>> {
        sqlx::query_as::<_, NewsArticle>(
            "SELECT * FROM news ORDER BY published_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list news", e))
    }

    async fn count_all(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count news", e))?;
        Ok(count as u64)
    }
}
