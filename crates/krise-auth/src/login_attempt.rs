//! Failed-login tracking and temporary lockout.
//!
//! Counts failures per email in a TTL cache; the cache expiry doubles as
//! the lockout window, so a locked account unlocks itself when the entry
//! ages out.

use std::time::Duration;

use moka::sync::Cache;

use krise_core::config::AuthConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;

/// Tracks consecutive failed logins per account.
#[derive(Debug, Clone)]
pub struct LoginAttemptTracker {
    failures: Cache<String, u32>,
    max_failed_attempts: u32,
}

impl LoginAttemptTracker {
    /// Creates the tracker with the configured threshold and lockout window.
    pub fn new(config: &AuthConfig) -> Self {
        let window = Duration::from_secs(config.lockout_duration_minutes.max(1) as u64 * 60);
        Self {
            failures: Cache::builder()
                .max_capacity(1_000_000)
                .time_to_live(window)
                .build(),
            max_failed_attempts: config.max_failed_attempts,
        }
    }

    /// Fails with RateLimit if the account is currently locked out.
    pub fn check_allowed(&self, email: &str) -> AppResult<()> {
        let key = normalize(email);
        if self.failures.get(&key).unwrap_or(0) >= self.max_failed_attempts {
            return Err(AppError::rate_limit(
                "Too many failed login attempts. Try again later.",
            ));
        }
        Ok(())
    }

    /// Records a failed attempt.
    pub fn record_failure(&self, email: &str) {
        let key = normalize(email);
        let count = self.failures.get(&key).unwrap_or(0) + 1;
        self.failures.insert(key, count);
    }

    /// Clears the failure count after a successful login.
    pub fn record_success(&self, email: &str) {
        self.failures.invalidate(&normalize(email));
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> LoginAttemptTracker {
        LoginAttemptTracker::new(&AuthConfig::default())
    }

    #[test]
    fn test_locks_after_max_failures() {
        let t = tracker();
        for _ in 0..5 {
            assert!(t.check_allowed("a@b.no").is_ok());
            t.record_failure("a@b.no");
        }
        assert!(t.check_allowed("a@b.no").is_err());
    }

    #[test]
    fn test_success_resets_counter() {
        let t = tracker();
        for _ in 0..4 {
            t.record_failure("a@b.no");
        }
        t.record_success("a@b.no");
        assert!(t.check_allowed("a@b.no").is_ok());
    }

    #[test]
    fn test_email_case_insensitive() {
        let t = tracker();
        for _ in 0..5 {
            t.record_failure("A@B.no");
        }
        assert!(t.check_allowed("a@b.no ").is_err());
    }
}
