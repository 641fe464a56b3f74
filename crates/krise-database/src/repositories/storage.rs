//! Storage inventory repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::storage::{ExpiringItem, StorageItem};
use krise_entity::stores::StorageStore;

/// PostgreSQL-backed storage inventory reader.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: PgPool,
}

impl StorageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageStore for StorageRepository {
    async fn find_by_household(&self, household_id: Uuid) -> AppResult<Vec<StorageItem>> {
        sqlx::query_as::<_, StorageItem>(
            "SELECT * FROM storage_items WHERE household_id = $1 ORDER BY item_name ASC",
        )
        .bind(household_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list storage items", e)
        })
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<ExpiringItem>> {
        sqlx::query_as::<_, ExpiringItem>(
            "SELECT id, household_id, item_name, expiration FROM storage_items \
             WHERE expiration IS NOT NULL AND expiration BETWEEN $1 AND $2 \
             ORDER BY expiration ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query expiring items", e)
        })
    }
}
