//! Handlers for the `/api/admin/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`]. Mutations
//! are audited with redacted snapshots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_core::roles::is_valid_role;
use eventhubble_core::types::DbId;
use eventhubble_db::models::user::{CreateUser, UpdateUser, UserResponse};
use eventhubble_db::repositories::{SessionRepo, UserRepo};

use crate::audit::{self, snapshot, AuditEntry};
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on user creation and password reset.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

/// Request body for `PUT /api/admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /api/admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/users
///
/// Create a new user. Validates email, role, and password strength, hashes
/// the password, and returns a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if !is_valid_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {}",
            input.role
        ))));
    }

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email: input.email,
        password_hash: hashed,
        full_name: input.full_name,
        role: input.role,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;
    let response = UserResponse::from(&user);

    tracing::info!(user_id = user.id, created_by = admin.id, "User created");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::CREATE,
            entity_type: "user",
            entity_id: Some(user.id),
            before: None,
            after: snapshot(&response),
        },
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/admin/users/{id}
///
/// Update a user's profile fields (not password).
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role) = &input.role {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let before = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let update_dto = UpdateUser {
        email: input.email,
        full_name: input.full_name,
        role: input.role,
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = UserResponse::from(&user);

    tracing::info!(user_id = id, updated_by = admin.id, "User updated");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::UPDATE,
            entity_type: "user",
            entity_id: Some(id),
            before: snapshot(&UserResponse::from(&before)),
            after: snapshot(&response),
        },
    );

    Ok(Json(response))
}

/// DELETE /api/admin/users/{id}
///
/// Soft-deactivate a user (sets `is_active = false`) and invalidate their
/// sessions. Returns 204 No Content.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let before = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::deactivate_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, deactivated_by = admin.id, "User deactivated");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::DELETE,
            entity_type: "user",
            entity_id: Some(id),
            before: snapshot(&UserResponse::from(&before)),
            after: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/users/{id}/reset-password
///
/// Admin-initiated password reset. Invalidates every session for the user
/// (forced logout).
pub async fn reset_password(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::deactivate_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, reset_by = admin.id, "Password reset");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::PASSWORD_RESET,
            entity_type: "user",
            entity_id: Some(id),
            before: None,
            after: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}
