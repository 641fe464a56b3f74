//! Storage inventory domain entities.

pub mod model;

pub use model::{ExpiringItem, StorageItem};
