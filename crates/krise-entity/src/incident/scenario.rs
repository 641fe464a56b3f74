//! Scenario entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A crisis scenario (flood, power outage, ...) that incidents reference.
///
/// The scenario name appears in the emergency-alert message sent to users
/// near a new incident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Scenario {
    /// Unique scenario identifier.
    pub id: Uuid,
    /// Scenario name.
    pub name: String,
    /// What this scenario is.
    pub description: String,
    /// What affected users should do.
    pub instructions: Option<String>,
    /// Icon identifier for the map frontend.
    pub icon_name: Option<String>,
    /// When the scenario was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    pub description: String,
    pub instructions: Option<String>,
    pub icon_name: Option<String>,
}
