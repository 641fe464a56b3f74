//! # krise-entity
//!
//! Domain entity models for Krisevarsel. Every struct in the domain modules
//! represents a database table row or a domain value object; all of them
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! The `stores` module holds the persistence contracts the service layer
//! depends on. Repositories in `krise-database` implement them against
//! PostgreSQL; tests implement them in memory.

pub mod household;
pub mod incident;
pub mod mapicon;
pub mod membership;
pub mod news;
pub mod notification;
pub mod storage;
pub mod stores;
pub mod user;
