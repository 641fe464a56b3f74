//! Map icon domain entities.

pub mod kind;
pub mod model;

pub use kind::MapIconKind;
pub use model::{MapIcon, NewMapIcon};
