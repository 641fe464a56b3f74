//! Outbound email abstraction.

use async_trait::async_trait;

use crate::result::AppResult;

/// Sends transactional email (confirmation links, two-factor codes,
/// password resets).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Mailer that writes messages to the log instead of delivering them.
///
/// Used in development and in tests; deployments plug in a real SMTP or
/// API-backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        tracing::info!(to, subject, body, "outbound email (log-only mailer)");
        Ok(())
    }
}
