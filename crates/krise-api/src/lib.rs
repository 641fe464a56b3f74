//! # krise-api
//!
//! HTTP layer built on Axum: REST endpoints, the WebSocket upgrade,
//! request/response DTOs, the authentication extractor, and the mapping
//! from domain errors to HTTP status codes.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
