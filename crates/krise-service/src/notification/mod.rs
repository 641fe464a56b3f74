//! Notification listing, read-marking, and fan-out helpers.

pub mod service;

pub use service::NotificationService;
