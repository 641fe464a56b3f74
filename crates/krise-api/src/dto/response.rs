//! Response DTOs.

use serde::{Deserialize, Serialize};

use krise_auth::jwt::TokenPair;

/// Standard success envelope for all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message payload for operations without a richer result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login result: either tokens, or a prompt for the emailed code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub two_factor_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenPair>,
}

impl LoginResponse {
    pub fn tokens(tokens: TokenPair) -> Self {
        Self {
            two_factor_required: false,
            tokens: Some(tokens),
        }
    }

    pub fn two_factor_required() -> Self {
        Self {
            two_factor_required: true,
            tokens: None,
        }
    }
}

/// Health probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
