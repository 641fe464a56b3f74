//! Crisis scenario catalog.

pub mod service;

pub use service::ScenarioService;
