//! Scenario repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::incident::{NewScenario, Scenario};
use krise_entity::stores::ScenarioStore;

/// PostgreSQL-backed scenario store.
#[derive(Debug, Clone)]
pub struct ScenarioRepository {
    pool: PgPool,
}

impl ScenarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScenarioStore for ScenarioRepository {
    async fn create(&self, scenario: NewScenario) -> AppResult<Scenario> {
        sqlx::query_as::<_, Scenario>(
            "INSERT INTO scenarios (name, description, instructions, icon_name) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&scenario.name)
        .bind(&scenario.description)
        .bind(&scenario.instructions)
        .bind(&scenario.icon_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create scenario", e))
    }

    async fn update(&self, id: Uuid, scenario: NewScenario) -> AppResult<Scenario> {
        sqlx::query_as::<_, Scenario>(
            "UPDATE scenarios SET name = $2, description = $3, instructions = $4, icon_name = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&scenario.name)
        .bind(&scenario.description)
        .bind(&scenario.instructions)
        .bind(&scenario.icon_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update scenario", e))?
        .ok_or_else(|| AppError::not_found(format!("Scenario {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Scenario>> {
        sqlx::query_as::<_, Scenario>("SELECT * FROM scenarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find scenario", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Scenario>> {
        sqlx::query_as::<_, Scenario>("SELECT * FROM scenarios ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list scenarios", e))
    }
}
