//! Registration, login, and credential recovery.

pub mod service;

pub use service::{AuthService, LoginOutcome};
