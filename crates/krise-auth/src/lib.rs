//! # krise-auth
//!
//! Authentication building blocks for Krisevarsel.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `two_factor` — emailed one-time login codes with TTL
//! - `tokens` — email-confirmation and password-reset tokens
//! - `login_attempt` — failed-login tracking and temporary lockout
//! - `captcha` — hCaptcha-style verification of registration requests

pub mod captcha;
pub mod jwt;
pub mod login_attempt;
pub mod password;
pub mod tokens;
pub mod two_factor;

pub use captcha::CaptchaVerifier;
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use login_attempt::LoginAttemptTracker;
pub use password::{PasswordHasher, PasswordValidator};
pub use tokens::{EmailTokenKind, EmailTokenService};
pub use two_factor::TwoFactorService;
