//! Incident and scenario domain entities.

pub mod model;
pub mod scenario;
pub mod severity;

pub use model::{Incident, NewIncident, UpdateIncident};
pub use scenario::{NewScenario, Scenario};
pub use severity::Severity;
