//! Handlers for the `/api/auth` resource (login, refresh, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_core::types::DbId;
use eventhubble_db::models::session::CreateSession;
use eventhubble_db::models::user::User;
use eventhubble_db::repositories::{SessionRepo, UserRepo};

use crate::audit::{self, AuditEntry};
use crate::auth::jwt::{
    issue_access_token, issue_refresh_token, token_fingerprint, verify_refresh_token,
};
use crate::auth::password::verify_password;
use crate::cookies::{
    clear_cookie, cookie_value, set_cookie, ACCESS_COOKIE, CSRF_COOKIE, REFRESH_COOKIE,
};
use crate::error::{AppError, AppResult, AuthError};
use crate::middleware::auth::AuthUser;
use crate::middleware::client_meta::ClientMeta;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public user info embedded in [`LoginResponse`] and returned by `me`.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// Successful authentication response returned by login and refresh. The
/// tokens themselves travel only in cookies.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. On success sets the access/refresh
/// token cookies plus a fresh CSRF cookie and persists a session row.
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<LoginRequest>,
) -> AppResult<(AppendHeaders<[(HeaderName, String); 3]>, Json<DataResponse<LoginResponse>>)> {
    // 1. Find user by email. Missing users get the same message as a wrong
    //    password so the endpoint does not leak which emails exist.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // 2. Deactivated accounts cannot log in.
    if !user.is_active {
        return Err(AuthError::UserInactive.into());
    }

    // 3. A locked account rejects the attempt regardless of password
    //    correctness.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold reached.
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        let new_count = user.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failures");
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // 6. On success: reset failed count, stamp last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;

    // 7. Issue the token pair and persist the session.
    let (access_token, refresh_token) = issue_token_pair(&state, &user)?;
    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        access_token_hash: token_fingerprint(&access_token),
        refresh_token_hash: token_fingerprint(&refresh_token),
        expires_at,
        ip_address: meta.ip_address.clone(),
        user_agent: meta.user_agent.clone(),
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let auth_user = AuthUser {
        id: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        full_name: user.full_name.clone(),
    };
    audit::record(
        &state.pool,
        &auth_user,
        &meta,
        AuditEntry {
            action: action_types::LOGIN,
            entity_type: "user",
            entity_id: Some(user.id),
            before: None,
            after: None,
        },
    );

    let cookies = auth_cookie_headers(&state, &access_token, &refresh_token);
    Ok((AppendHeaders(cookies), Json(DataResponse { data: login_response(&state, &user) })))
}

/// POST /api/auth/refresh
///
/// Exchange the refresh token cookie for a fresh token pair. Two-phase:
/// token validity and session validity are checked independently before the
/// single mutating step, a compare-and-swap rotation of the session row.
pub async fn refresh(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> AppResult<(AppendHeaders<[(HeaderName, String); 3]>, Json<DataResponse<LoginResponse>>)> {
    // 1. Extract the refresh token cookie.
    let presented =
        cookie_value(&headers, REFRESH_COOKIE).ok_or(AuthError::RefreshTokenMissing)?;

    // 2. Verify signature, expiry, and token class.
    let claims = verify_refresh_token(&presented, &state.config.jwt)
        .ok_or(AuthError::RefreshTokenInvalid)?;

    // 3. Load the user's most recent active session. The repository already
    //    rejects expired rows.
    let session = SessionRepo::find_active_by_user(&state.pool, claims.sub)
        .await?
        .ok_or(AuthError::SessionExpired)?;

    // 4. The presented token must be the one currently bound to the
    //    session. A valid signature is not enough -- after rotation the old
    //    token still verifies but its fingerprint no longer matches.
    if token_fingerprint(&presented) != session.refresh_token_hash {
        return Err(AuthError::RefreshTokenInvalid.into());
    }

    // 5. Reload the user; deactivation invalidates outstanding sessions.
    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or(AuthError::UserInactive)?;
    if !user.is_active {
        return Err(AuthError::UserInactive.into());
    }

    // 6. Issue a new pair and rotate. The UPDATE is guarded on the old
    //    refresh hash; a concurrent refresh that rotated first makes this
    //    one lose cleanly.
    let (access_token, refresh_token) = issue_token_pair(&state, &user)?;
    let new_expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let rotated = SessionRepo::rotate(
        &state.pool,
        session.id,
        &session.refresh_token_hash,
        &token_fingerprint(&access_token),
        &token_fingerprint(&refresh_token),
        new_expires_at,
    )
    .await?;

    if !rotated {
        return Err(AuthError::SessionExpired.into());
    }

    tracing::debug!(user_id = user.id, session_id = session.id, "Session rotated");

    let cookies = auth_cookie_headers(&state, &access_token, &refresh_token);
    Ok((AppendHeaders(cookies), Json(DataResponse { data: login_response(&state, &user) })))
}

/// POST /api/auth/logout
///
/// Deactivate every session for the authenticated user and clear the auth
/// cookies.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    meta: ClientMeta,
) -> AppResult<(AppendHeaders<[(HeaderName, String); 3]>, StatusCode)> {
    let count = SessionRepo::deactivate_all_for_user(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, sessions = count, "User logged out");

    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::LOGOUT,
            entity_type: "user",
            entity_id: Some(user.id),
            before: None,
            after: None,
        },
    );

    let secure = state.config.cookie_secure;
    let cookies = [
        (SET_COOKIE, clear_cookie(ACCESS_COOKIE, secure)),
        (SET_COOKIE, clear_cookie(REFRESH_COOKIE, secure)),
        (SET_COOKIE, clear_cookie(CSRF_COOKIE, secure)),
    ];
    Ok((AppendHeaders(cookies), StatusCode::NO_CONTENT))
}

/// GET /api/auth/me
///
/// Return the authenticated user's projection.
pub async fn me(user: AuthUser) -> Json<DataResponse<UserInfo>> {
    Json(DataResponse {
        data: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access/refresh pair for `user`.
fn issue_token_pair(state: &AppState, user: &User) -> AppResult<(String, String)> {
    let access = issue_access_token(
        user.id,
        &user.email,
        &user.role,
        &user.full_name,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = issue_refresh_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok((access, refresh))
}

/// Build the three `Set-Cookie` headers carrying the token pair and a fresh
/// CSRF token.
fn auth_cookie_headers(
    state: &AppState,
    access_token: &str,
    refresh_token: &str,
) -> [(HeaderName, String); 3] {
    let secure = state.config.cookie_secure;
    let access_max_age = state.config.jwt.access_token_expiry_mins * 60;
    let refresh_max_age = state.config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
    let csrf_token = Uuid::new_v4().to_string();

    [
        (
            SET_COOKIE,
            set_cookie(ACCESS_COOKIE, access_token, access_max_age, secure, true),
        ),
        (
            SET_COOKIE,
            set_cookie(REFRESH_COOKIE, refresh_token, refresh_max_age, secure, true),
        ),
        (
            SET_COOKIE,
            set_cookie(CSRF_COOKIE, &csrf_token, refresh_max_age, secure, false),
        ),
    ]
}

/// Build the response body shared by login and refresh.
fn login_response(state: &AppState, user: &User) -> LoginResponse {
    LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
        },
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    }
}
