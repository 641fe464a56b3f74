//! Email-confirmation and password-reset tokens.
//!
//! Tokens are opaque random strings held in in-memory TTL caches, one cache
//! per token kind. Consuming a token removes it, so each link works once.

use std::time::Duration;

use moka::future::Cache;
use rand::RngExt;
use rand::distr::Alphanumeric;
use uuid::Uuid;

use krise_core::config::AuthConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;

/// Length of an emailed token string.
const TOKEN_LENGTH: usize = 48;

/// What an emailed token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTokenKind {
    /// Confirms the registration email address.
    Confirmation,
    /// Authorizes a password reset.
    PasswordReset,
}

/// Issues and consumes emailed one-shot tokens.
#[derive(Debug, Clone)]
pub struct EmailTokenService {
    confirmation: Cache<String, Uuid>,
    password_reset: Cache<String, Uuid>,
}

impl EmailTokenService {
    /// Creates the service with the configured token lifetime.
    pub fn new(config: &AuthConfig) -> Self {
        let ttl = Duration::from_secs(config.email_token_ttl_hours.max(1) as u64 * 3600);
        let build = || {
            Cache::builder()
                .max_capacity(100_000)
                .time_to_live(ttl)
                .build()
        };
        Self {
            confirmation: build(),
            password_reset: build(),
        }
    }

    /// Issues a fresh token bound to the user.
    pub async fn issue(&self, kind: EmailTokenKind, user_id: Uuid) -> String {
        let token = generate_token();
        self.cache(kind).insert(token.clone(), user_id).await;
        token
    }

    /// Consumes a token, returning the bound user. Fails with Validation if
    /// the token is unknown or expired.
    pub async fn consume(&self, kind: EmailTokenKind, token: &str) -> AppResult<Uuid> {
        let cache = self.cache(kind);
        match cache.get(token).await {
            Some(user_id) => {
                cache.remove(token).await;
                Ok(user_id)
            }
            None => Err(AppError::validation("Invalid or expired token")),
        }
    }

    fn cache(&self, kind: EmailTokenKind) -> &Cache<String, Uuid> {
        match kind {
            EmailTokenKind::Confirmation => &self.confirmation,
            EmailTokenKind::PasswordReset => &self.password_reset,
        }
    }
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EmailTokenService {
        EmailTokenService::new(&AuthConfig::default())
    }

    #[tokio::test]
    async fn test_token_consumes_once() {
        let svc = service();
        let user = Uuid::new_v4();
        let token = svc.issue(EmailTokenKind::Confirmation, user).await;

        assert_eq!(
            svc.consume(EmailTokenKind::Confirmation, &token)
                .await
                .unwrap(),
            user
        );
        assert!(svc
            .consume(EmailTokenKind::Confirmation, &token)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_kinds_are_isolated() {
        let svc = service();
        let user = Uuid::new_v4();
        let token = svc.issue(EmailTokenKind::PasswordReset, user).await;

        // A reset token is not valid as a confirmation token.
        assert!(svc
            .consume(EmailTokenKind::Confirmation, &token)
            .await
            .is_err());
        assert!(svc
            .consume(EmailTokenKind::PasswordReset, &token)
            .await
            .is_ok());
    }
}
