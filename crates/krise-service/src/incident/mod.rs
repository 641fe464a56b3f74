//! Incident lifecycle and geo-radius notification fan-out.

pub mod fanout;
pub mod service;

pub use fanout::{IncidentEvent, NotificationFanout};
pub use service::IncidentService;
