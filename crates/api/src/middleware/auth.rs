//! The auth gate: a cookie-based authentication extractor.
//!
//! Each authenticated request walks the same state machine:
//!
//! 1. pull the access token from its HTTP-only cookie (`TOKEN_MISSING`),
//! 2. verify signature/expiry/`typ` (`TOKEN_INVALID`),
//! 3. load the user and check the active flag (`USER_INACTIVE`),
//! 4. attach a minimal user projection to the request.
//!
//! Database failures during step 3 surface as 500 `AUTH_ERROR`, never a
//! panic or a leaked sqlx message.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use eventhubble_core::types::DbId;
use eventhubble_db::repositories::UserRepo;

use crate::auth::jwt::verify_access_token;
use crate::cookies::{cookie_value, ACCESS_COOKIE};
use crate::error::{AppError, AuthError};
use crate::state::AppState;

/// Authenticated user extracted from the `accessToken` cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub id: DbId,
    pub email: String,
    /// The user's role name (`"admin"`, `"editor"`, `"viewer"`).
    pub role: String,
    pub full_name: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            cookie_value(&parts.headers, ACCESS_COOKIE).ok_or(AuthError::TokenMissing)?;

        let claims =
            verify_access_token(&token, &state.config.jwt).ok_or(AuthError::TokenInvalid)?;

        // The token may outlive the account: re-check the user row on every
        // request so deactivation takes effect immediately.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| AuthError::Internal(format!("User lookup failed: {e}")))?
            .ok_or(AuthError::UserInactive)?;

        if !user.is_active {
            return Err(AuthError::UserInactive.into());
        }

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
        })
    }
}
