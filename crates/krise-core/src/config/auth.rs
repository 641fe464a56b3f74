//! Authentication and account-security configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign JWTs.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_hours: i64,
    /// Minimum password length.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: u32,
    /// Minimum zxcvbn score (0-4) for new passwords.
    #[serde(default = "default_min_password_score")]
    pub min_password_score: u8,
    /// Failed login attempts before the account is locked.
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
    /// How long a locked account stays locked, in minutes.
    #[serde(default = "default_lockout_minutes")]
    pub lockout_duration_minutes: i64,
    /// Lifetime of emailed two-factor codes, in minutes.
    #[serde(default = "default_two_factor_ttl")]
    pub two_factor_ttl_minutes: i64,
    /// Lifetime of email-confirmation and password-reset tokens, in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub email_token_ttl_hours: i64,
    /// Base URL used when building confirmation/reset links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// CAPTCHA verification settings.
    #[serde(default)]
    pub captcha: CaptchaConfig,
}

/// CAPTCHA verification configuration (hCaptcha-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaConfig {
    /// Whether CAPTCHA verification is enforced on registration and login.
    #[serde(default)]
    pub enabled: bool,
    /// Verification endpoint URL.
    #[serde(default = "default_captcha_url")]
    pub verify_url: String,
    /// Shared secret for the verification endpoint.
    #[serde(default)]
    pub secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min_length(),
            min_password_score: default_min_password_score(),
            max_failed_attempts: default_max_failed_attempts(),
            lockout_duration_minutes: default_lockout_minutes(),
            two_factor_ttl_minutes: default_two_factor_ttl(),
            email_token_ttl_hours: default_token_ttl_hours(),
            frontend_url: default_frontend_url(),
            captcha: CaptchaConfig::default(),
        }
    }
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            verify_url: default_captcha_url(),
            secret: String::new(),
        }
    }
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    24 * 7
}

fn default_password_min_length() -> u32 {
    8
}

fn default_min_password_score() -> u8 {
    3
}

fn default_max_failed_attempts() -> u32 {
    5
}

fn default_lockout_minutes() -> i64 {
    15
}

fn default_two_factor_ttl() -> i64 {
    10
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_captcha_url() -> String {
    "https://api.hcaptcha.com/siteverify".to_string()
}
