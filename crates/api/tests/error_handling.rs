//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each error variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;

use eventhubble_api::error::{AppError, AuthError};
use eventhubble_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Auth taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_missing_returns_401() {
    let (status, json) = error_to_response(AuthError::TokenMissing.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn token_invalid_returns_401() {
    let (status, json) = error_to_response(AuthError::TokenInvalid.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn user_inactive_returns_401() {
    let (status, json) = error_to_response(AuthError::UserInactive.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "USER_INACTIVE");
}

#[tokio::test]
async fn insufficient_permissions_returns_403() {
    let (status, json) = error_to_response(AuthError::InsufficientPermissions.into()).await;
    assert_eq!(status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn session_expired_returns_401() {
    let (status, json) = error_to_response(AuthError::SessionExpired.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn refresh_token_errors_return_401() {
    let (status, json) = error_to_response(AuthError::RefreshTokenMissing.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "REFRESH_TOKEN_MISSING");

    let (status, json) = error_to_response(AuthError::RefreshTokenInvalid.into()).await;
    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "REFRESH_TOKEN_INVALID");
}

#[tokio::test]
async fn rate_limit_returns_429() {
    let (status, json) = error_to_response(AuthError::RateLimitExceeded.into()).await;
    assert_eq!(status, axum::http::StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn csrf_returns_403() {
    let (status, json) = error_to_response(AuthError::Csrf.into()).await;
    assert_eq!(status, axum::http::StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "CSRF_ERROR");
}

#[tokio::test]
async fn auth_internal_returns_500_and_sanitizes() {
    let err = AuthError::Internal("sqlx: connection refused to db:5432".into());
    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "AUTH_ERROR");

    // The response body must NOT leak the underlying failure.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("5432"),
        "AUTH_ERROR response must not leak internal details"
    );
}

// ---------------------------------------------------------------------------
// Core / HTTP errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Event",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Event with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("title is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "title is required");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn sqlx_row_not_found_maps_to_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
