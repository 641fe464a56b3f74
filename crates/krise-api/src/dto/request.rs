//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_entity::incident::Severity;
use krise_entity::mapicon::MapIconKind;

/// Runs declarative validation on a request body, mapping failures to a
/// 400 response.
pub fn validated<T: Validate>(body: T) -> AppResult<T> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(body)
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Captcha response token; ignored when captcha is disabled.
    #[serde(default)]
    pub captcha_token: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub captcha_token: String,
}

/// Two-factor code verification body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TwoFactorRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Email-token request body (confirmation links).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailTokenRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Request carrying only an email address (reset, resend).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Password reset request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub new_password: String,
}

/// Two-factor toggle body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorToggleRequest {
    pub enabled: bool,
}

/// Household create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HouseholdRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Address must be 1-255 characters"))]
    pub address: String,
}

/// Invite-a-user body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Join-a-household body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinHouseholdRequest {
    pub household_id: Uuid,
}

/// Ownership transfer body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeOwnerRequest {
    pub new_owner_id: Uuid,
}

/// Unregistered member body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnregisteredMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub full_name: String,
}

/// Position update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Incident create body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIncidentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub impact_radius_km: f64,
    pub severity: Severity,
    pub started_at: DateTime<Utc>,
    pub scenario_id: Uuid,
}

/// Incident update body. Setting `ended_at` closes the incident.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateIncidentRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub impact_radius_km: f64,
    pub severity: Severity,
    pub ended_at: Option<DateTime<Utc>>,
    pub scenario_id: Uuid,
}

/// Scenario create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScenarioRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: String,
    pub instructions: Option<String>,
    pub icon_name: Option<String>,
}

/// Map icon create/update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapIconRequest {
    pub kind: MapIconKind,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub description: Option<String>,
    pub opening_hours: Option<String>,
    pub contact_info: Option<String>,
}

/// `?latitude=&longitude=&radius_km=` query for proximity searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// `?latitude=&longitude=&kind=` query for closest-icon lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosestIconQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub kind: MapIconKind,
}

/// News article create body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub content: String,
    pub url: Option<String>,
}

/// Broadcast body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}
