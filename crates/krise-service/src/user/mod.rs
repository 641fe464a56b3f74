//! User profile and position sharing.

pub mod service;

pub use service::{MemberPosition, UserService};
