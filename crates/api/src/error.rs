use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use eventhubble_core::error::CoreError;

/// Authentication/authorization failure taxonomy.
///
/// Every variant maps to a stable `code` string in the JSON response body so
/// the frontend can branch on failures without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access token missing")]
    TokenMissing,

    #[error("Access token invalid or expired")]
    TokenInvalid,

    #[error("User not found or deactivated")]
    UserInactive,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Session expired or not found")]
    SessionExpired,

    #[error("Refresh token missing")]
    RefreshTokenMissing,

    #[error("Refresh token invalid")]
    RefreshTokenInvalid,

    #[error("Too many requests")]
    RateLimitExceeded,

    #[error("CSRF token missing or mismatched")]
    Csrf,

    /// Unexpected failure inside the auth pipeline. Reported as a generic
    /// 500 rather than propagated.
    #[error("Authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// The HTTP status and stable error code for this failure.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::TokenMissing => (StatusCode::UNAUTHORIZED, "TOKEN_MISSING"),
            AuthError::TokenInvalid => (StatusCode::UNAUTHORIZED, "TOKEN_INVALID"),
            AuthError::UserInactive => (StatusCode::UNAUTHORIZED, "USER_INACTIVE"),
            AuthError::InsufficientPermissions => {
                (StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS")
            }
            AuthError::SessionExpired => (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"),
            AuthError::RefreshTokenMissing => (StatusCode::UNAUTHORIZED, "REFRESH_TOKEN_MISSING"),
            AuthError::RefreshTokenInvalid => (StatusCode::UNAUTHORIZED, "REFRESH_TOKEN_INVALID"),
            AuthError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            AuthError::Csrf => (StatusCode::FORBIDDEN, "CSRF_ERROR"),
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR"),
        }
    }
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`AuthError`] for the auth
/// taxonomy, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent `{ "error": ..., "code": ... }` JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `eventhubble_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An authentication/authorization failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Auth(auth) => {
                if let AuthError::Internal(msg) = auth {
                    tracing::error!(error = %msg, "Unexpected auth pipeline error");
                }
                let (status, code) = auth.status_and_code();
                // The Internal variant is sanitized like every other 500.
                let message = match auth {
                    AuthError::Internal(_) => "An internal error occurred".to_string(),
                    other => other.to_string(),
                };
                (status, code, message)
            }

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to 409.
/// - Everything else maps to 500 with a sanitized message; the underlying
///   error is logged, never echoed to the client.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
