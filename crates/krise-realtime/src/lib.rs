//! # krise-realtime
//!
//! WebSocket push layer:
//!
//! - Connection pool with per-user connection limits
//! - Topic subscriptions (household positions, broadcasts)
//! - [`WsGateway`], the [`krise_core::traits::PushChannel`] implementation
//!   services push through

pub mod channel;
pub mod connection;
pub mod gateway;
pub mod message;

pub use channel::TopicRegistry;
pub use connection::{ConnectionHandle, ConnectionId, ConnectionManager};
pub use gateway::WsGateway;
pub use message::{InboundMessage, OutboundMessage};
