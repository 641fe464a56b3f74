//! Map icon repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::mapicon::{MapIcon, NewMapIcon};
use krise_entity::stores::MapIconStore;

/// PostgreSQL-backed map icon store.
#[derive(Debug, Clone)]
pub struct MapIconRepository {
    pool: PgPool,
}

impl MapIconRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MapIconStore for MapIconRepository {
    async fn create(&self, icon: NewMapIcon) -> AppResult<MapIcon> {
        sqlx::query_as::<_, MapIcon>(
            "INSERT INTO map_icons \
             (kind, latitude, longitude, address, description, opening_hours, contact_info) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(icon.kind)
        .bind(icon.latitude)
        .bind(icon.longitude)
        .bind(&icon.address)
        .bind(&icon.description)
        .bind(&icon.opening_hours)
        .bind(&icon.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create map icon", e))
    }

    async fn update(&self, id: Uuid, icon: NewMapIcon) -> AppResult<MapIcon> {
        sqlx::query_as::<_, MapIcon>(
            "UPDATE map_icons SET \
               kind = $2, latitude = $3, longitude = $4, address = $5, \
               description = $6, opening_hours = $7, contact_info = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(icon.kind)
        .bind(icon.latitude)
        .bind(icon.longitude)
        .bind(&icon.address)
        .bind(&icon.description)
        .bind(&icon.opening_hours)
        .bind(&icon.contact_info)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update map icon", e))?
        .ok_or_else(|| AppError::not_found(format!("Map icon {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM map_icons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete map icon", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Map icon {id} not found")));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MapIcon>> {
        sqlx::query_as::<_, MapIcon>("SELECT * FROM map_icons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find map icon", e))
    }

    async fn find_all(&self) -> AppResult<Vec<MapIcon>> {
        sqlx::query_as::<_, MapIcon>("SELECT * FROM map_icons ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list map icons", e))
    }
}
