//! Topic subscriptions.

pub mod registry;

pub use registry::TopicRegistry;
