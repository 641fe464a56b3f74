//! Public news feed.

pub mod service;

pub use service::NewsService;
