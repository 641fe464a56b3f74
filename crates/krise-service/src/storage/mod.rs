//! Household storage inventory and expiry notifications.

pub mod service;

pub use service::StorageService;
