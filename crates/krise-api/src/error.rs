//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `krise-core` (next to the
//! type, as coherence requires); this module re-exports the response body type
//! and hosts the mapping tests.

pub use krise_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use krise_core::error::AppError;

    #[test]
    fn test_client_errors_keep_their_message() {
        let response = AppError::validation("Radius must be positive").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_are_hidden() {
        let response = AppError::database("connection refused to db:5432").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        let response = AppError::rate_limit("Too many attempts").into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
