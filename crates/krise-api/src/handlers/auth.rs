//! Auth handlers: registration, login, two-factor, token refresh and
//! account recovery.

use axum::Json;
use axum::extract::State;

use krise_auth::jwt::TokenPair;
use krise_core::error::AppError;
use krise_entity::user::User;
use krise_service::LoginOutcome;

use crate::dto::request::{
    EmailRequest, EmailTokenRequest, LoginRequest, RefreshRequest, RegisterRequest,
    ResetPasswordRequest, TwoFactorRequest, TwoFactorToggleRequest, validated,
};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let req = validated(req)?;
    let user = state
        .auth_service
        .register(&req.email, &req.password, &req.full_name, &req.captcha_token)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/confirm-email
pub async fn confirm_email(
    State(state): State<AppState>,
    Json(req): Json<EmailTokenRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let req = validated(req)?;
    state.auth_service.confirm_email(&req.token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Email confirmed",
    ))))
}

/// POST /api/auth/resend-confirmation
///
/// Always responds with the same message so the endpoint cannot be used
/// to probe which addresses are registered.
pub async fn resend_confirmation(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let req = validated(req)?;
    state.auth_service.resend_confirmation(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If the address is registered, a confirmation link has been sent",
    ))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let req = validated(req)?;
    let outcome = state
        .auth_service
        .login(&req.email, &req.password, &req.captcha_token)
        .await?;

    let response = match outcome {
        LoginOutcome::Tokens(tokens) => LoginResponse::tokens(tokens),
        LoginOutcome::TwoFactorRequired => LoginResponse::two_factor_required(),
    };
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/auth/two-factor
pub async fn verify_two_factor(
    State(state): State<AppState>,
    Json(req): Json<TwoFactorRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let req = validated(req)?;
    let tokens = state
        .auth_service
        .verify_two_factor(&req.email, &req.code)
        .await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/request-password-reset
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let req = validated(req)?;
    state
        .auth_service
        .request_password_reset(&req.email)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If the address is registered, a reset link has been sent",
    ))))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let req = validated(req)?;
    state
        .auth_service
        .reset_password(&req.token, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password updated",
    ))))
}

/// PUT /api/auth/two-factor
pub async fn set_two_factor(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<TwoFactorToggleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.auth_service.set_two_factor(&auth, req.enabled).await?;
    let message = if req.enabled {
        "Two-factor authentication enabled"
    } else {
        "Two-factor authentication disabled"
    };
    Ok(Json(ApiResponse::ok(MessageResponse::new(message))))
}
