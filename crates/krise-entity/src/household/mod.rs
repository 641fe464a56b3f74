//! Household domain entities.

pub mod model;
pub mod unregistered;

pub use model::{Household, NewHousehold};
pub use unregistered::UnregisteredMember;
