//! Incident repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use krise_core::error::{AppError, ErrorKind};
use krise_core::result::AppResult;
use krise_entity::incident::{Incident, NewIncident, UpdateIncident};
use krise_entity::stores::IncidentStore;

/// PostgreSQL-backed incident store.
#[derive(Debug, Clone)]
pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentStore for IncidentRepository {
    async fn create(&self, incident: NewIncident) -> AppResult<Incident> {
        sqlx::query_as::<_, Incident>(
            "INSERT INTO incidents \
             (name, description, latitude, longitude, impact_radius_km, severity, started_at, scenario_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&incident.name)
        .bind(&incident.description)
        .bind(incident.latitude)
        .bind(incident.longitude)
        .bind(incident.impact_radius_km)
        .bind(incident.severity)
        .bind(incident.started_at)
        .bind(incident.scenario_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create incident", e))
    }

    async fn update(&self, id: Uuid, update: UpdateIncident) -> AppResult<Incident> {
        sqlx::query_as::<_, Incident>(
            "UPDATE incidents SET \
               name = $2, description = $3, latitude = $4, longitude = $5, \
               impact_radius_km = $6, severity = $7, ended_at = $8, scenario_id = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.impact_radius_km)
        .bind(update.severity)
        .bind(update.ended_at)
        .bind(update.scenario_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update incident", e))?
        .ok_or_else(|| AppError::not_found(format!("Incident {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete incident", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Incident {id} not found")));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>> {
        sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find incident", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Incident>> {
        sqlx::query_as::<_, Incident>("SELECT * FROM incidents ORDER BY started_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list incidents", e))
    }
}
