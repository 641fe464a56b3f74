//! Preparedness map icons.

pub mod service;

pub use service::MapIconService;
