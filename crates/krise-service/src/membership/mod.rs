//! Membership request state machine.

pub mod service;

pub use service::MembershipRequestService;
