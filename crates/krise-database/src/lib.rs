//! # krise-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations of the `krise-entity` store contracts.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
