//! Membership request domain entities.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::RequestKind;
pub use model::{MembershipRequest, NewMembershipRequest};
pub use status::RequestStatus;
