//! Map icon entity model.

use chrono::{DateTime, Utc};
use krise_core::types::Coordinates;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::MapIconKind;

/// A point of interest on the preparedness map.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MapIcon {
    /// Unique identifier.
    pub id: Uuid,
    /// What kind of point this is.
    pub kind: MapIconKind,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Street address, if known.
    pub address: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Opening hours, if applicable.
    pub opening_hours: Option<String>,
    /// Contact information, if applicable.
    pub contact_info: Option<String>,
    /// When the icon was created.
    pub created_at: DateTime<Utc>,
}

impl MapIcon {
    /// The icon's position.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Data required to create a new map icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMapIcon {
    pub kind: MapIconKind,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub description: Option<String>,
    pub opening_hours: Option<String>,
    pub contact_info: Option<String>,
}
