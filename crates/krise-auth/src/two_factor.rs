//! Emailed one-time login codes.
//!
//! Codes live in an in-memory TTL cache keyed by user ID. A code is
//! consumed on first successful verification, so it cannot be replayed.

use std::time::Duration;

use moka::future::Cache;
use rand::RngExt;
use uuid::Uuid;

use krise_core::config::AuthConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;

/// Number of digits in a login code.
const CODE_LENGTH: u32 = 6;

/// Issues and verifies emailed two-factor login codes.
#[derive(Debug, Clone)]
pub struct TwoFactorService {
    codes: Cache<Uuid, String>,
}

impl TwoFactorService {
    /// Creates the service with the configured code lifetime.
    pub fn new(config: &AuthConfig) -> Self {
        let ttl = Duration::from_secs(config.two_factor_ttl_minutes.max(1) as u64 * 60);
        Self {
            codes: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Generates a fresh code for the user, replacing any outstanding one.
    pub async fn issue_code(&self, user_id: Uuid) -> String {
        let code = generate_code();
        self.codes.insert(user_id, code.clone()).await;
        code
    }

    /// Verifies and consumes a code. Fails with Authentication if the code
    /// is missing, expired, or wrong.
    pub async fn verify_code(&self, user_id: Uuid, code: &str) -> AppResult<()> {
        match self.codes.get(&user_id).await {
            Some(expected) if expected == code => {
                self.codes.remove(&user_id).await;
                Ok(())
            }
            _ => Err(AppError::authentication("Invalid or expired login code")),
        }
    }
}

fn generate_code() -> String {
    let max = 10u32.pow(CODE_LENGTH);
    let n = rand::rng().random_range(0..max);
    format!("{n:06}")
}
