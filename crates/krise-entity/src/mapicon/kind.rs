//! Map icon kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of point of interest shown on the preparedness map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "map_icon_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapIconKind {
    /// Public emergency shelter.
    Shelter,
    /// Defibrillator location.
    Defibrillator,
    /// Emergency clinic.
    EmergencyClinic,
    /// Drinking-water distribution point.
    WaterStation,
    /// Food distribution point.
    FoodStation,
    /// Designated meeting place.
    MeetingPlace,
}

impl MapIconKind {
    /// Return the kind as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shelter => "SHELTER",
            Self::Defibrillator => "DEFIBRILLATOR",
            Self::EmergencyClinic => "EMERGENCY_CLINIC",
            Self::WaterStation => "WATER_STATION",
            Self::FoodStation => "FOOD_STATION",
            Self::MeetingPlace => "MEETING_PLACE",
        }
    }
}

impl fmt::Display for MapIconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
