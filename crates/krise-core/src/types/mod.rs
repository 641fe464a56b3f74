//! Core type definitions used across the Krisevarsel workspace.

pub mod geo;
pub mod pagination;

pub use geo::{Coordinates, EARTH_RADIUS_KM, RADIUS_SAFETY_FACTOR, haversine_km};
pub use pagination::{PageRequest, PageResponse};
