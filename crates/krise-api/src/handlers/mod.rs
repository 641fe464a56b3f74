//! HTTP and WebSocket handlers, grouped by domain.

pub mod auth;
pub mod health;
pub mod household;
pub mod incident;
pub mod mapicon;
pub mod membership;
pub mod news;
pub mod notification;
pub mod scenario;
pub mod storage;
pub mod user;
pub mod ws;
