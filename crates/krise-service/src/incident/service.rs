//! Incident CRUD driving the notification fan-out.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_entity::incident::{Incident, NewIncident, UpdateIncident};
use krise_entity::stores::{IncidentStore, ScenarioStore};

use crate::context::RequestContext;

use super::fanout::{IncidentEvent, NotificationFanout};

/// Admin-managed incident lifecycle. Every mutation fans notifications out
/// to nearby users.
#[derive(Clone)]
pub struct IncidentService {
    incidents: Arc<dyn IncidentStore>,
    scenarios: Arc<dyn ScenarioStore>,
    fanout: NotificationFanout,
}

impl IncidentService {
    /// Creates a new incident service.
    pub fn new(
        incidents: Arc<dyn IncidentStore>,
        scenarios: Arc<dyn ScenarioStore>,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            incidents,
            scenarios,
            fanout,
        }
    }

    /// Creates an incident and alerts everyone inside the search radius.
    pub async fn create(&self, ctx: &RequestContext, data: NewIncident) -> AppResult<Incident> {
        self.require_admin(ctx)?;

        let scenario = self
            .scenarios
            .find_by_id(data.scenario_id)
            .await?
            .ok_or_else(|| AppError::validation("Scenario does not exist"))?;

        if data.impact_radius_km <= 0.0 {
            return Err(AppError::validation("Impact radius must be positive"));
        }

        let incident = self.incidents.create(data).await?;
        info!(incident_id = %incident.id, "Incident created");

        self.fanout
            .fan_out(&incident, &scenario.name, IncidentEvent::Created)
            .await?;

        Ok(incident)
    }

    /// Updates an incident. Setting `ended_at` for the first time closes it
    /// and switches the fan-out message accordingly.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateIncident,
    ) -> AppResult<Incident> {
        self.require_admin(ctx)?;

        let existing = self
            .incidents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Incident {id} not found")))?;

        let scenario = self
            .scenarios
            .find_by_id(data.scenario_id)
            .await?
            .ok_or_else(|| AppError::validation("Scenario does not exist"))?;

        let newly_closed = existing.ended_at.is_none() && data.ended_at.is_some();
        let updated = self.incidents.update(id, data).await?;

        let event = if newly_closed {
            IncidentEvent::Closed
        } else {
            IncidentEvent::Updated
        };
        self.fanout.fan_out(&updated, &scenario.name, event).await?;

        Ok(updated)
    }

    /// Deletes an incident. No fan-out; the record simply disappears.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.require_admin(ctx)?;
        self.incidents.delete(id).await
    }

    /// All incidents, newest first.
    pub async fn list(&self) -> AppResult<Vec<Incident>> {
        self.incidents.find_all().await
    }

    /// One incident by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<Incident> {
        self.incidents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Incident {id} not found")))
    }

    fn require_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may manage incidents"));
        }
        Ok(())
    }
}
