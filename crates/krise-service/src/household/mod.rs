//! Household aggregate management.

pub mod service;

pub use service::{HouseholdDetails, HouseholdService, HouseholdSummary};
