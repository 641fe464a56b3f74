//! Incident entity model.

use chrono::{DateTime, Utc};
use krise_core::types::Coordinates;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::severity::Severity;

/// An ongoing or closed incident with a geographic impact area.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incident {
    /// Unique incident identifier.
    pub id: Uuid,
    /// Incident name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Latitude of the incident center.
    pub latitude: f64,
    /// Longitude of the incident center.
    pub longitude: f64,
    /// Impact radius in kilometers.
    pub impact_radius_km: f64,
    /// Severity level.
    pub severity: Severity,
    /// When the incident started.
    pub started_at: DateTime<Utc>,
    /// When the incident ended. `None` while ongoing.
    pub ended_at: Option<DateTime<Utc>>,
    /// The scenario this incident belongs to.
    pub scenario_id: Uuid,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// The incident's center point.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Whether the incident has been closed.
    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }
}

/// Data required to create a new incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub impact_radius_km: f64,
    pub severity: Severity,
    pub started_at: DateTime<Utc>,
    pub scenario_id: Uuid,
}

/// Fields that may change when an incident is updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIncident {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub impact_radius_km: f64,
    pub severity: Severity,
    /// Setting this closes the incident.
    pub ended_at: Option<DateTime<Utc>>,
    pub scenario_id: Uuid,
}
