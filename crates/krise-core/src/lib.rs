//! # krise-core
//!
//! Core crate for Krisevarsel. Contains configuration schemas, shared
//! domain-independent types (geo coordinates, pagination), collaborator
//! traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Krisevarsel crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
