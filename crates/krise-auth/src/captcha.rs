//! Captcha verification against an hCaptcha-compatible endpoint.

use serde::Deserialize;

use krise_core::config::CaptchaConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;

/// Verifies captcha response tokens with the configured provider.
#[derive(Debug, Clone)]
pub struct CaptchaVerifier {
    client: reqwest::Client,
    config: CaptchaConfig,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl CaptchaVerifier {
    pub fn new(config: CaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Verifies a client-supplied captcha token.
    ///
    /// A no-op when verification is disabled in configuration.
    pub async fn verify(&self, token: &str) -> AppResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        if token.is_empty() {
            return Err(AppError::validation("Captcha token is required"));
        }

        let response = self
            .client
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Captcha verification request failed: {e}"))
            })?;

        let body: VerifyResponse = response.json().await.map_err(|e| {
            AppError::external_service(format!("Invalid captcha verification response: {e}"))
        })?;

        if !body.success {
            tracing::warn!(errors = ?body.error_codes, "Captcha verification rejected");
            return Err(AppError::validation("Captcha verification failed"));
        }

        Ok(())
    }
}
