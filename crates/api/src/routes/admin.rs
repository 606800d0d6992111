//! Route definitions for the `/api/admin` resource (user management and
//! the audit trail).

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::handlers::{admin, audit};
use crate::middleware::csrf;
use crate::state::AppState;

/// Routes mounted at `/api/admin`. All handlers enforce the admin role;
/// CSRF covers the mutating subset (safe methods pass trivially).
///
/// ```text
/// GET    /users                     -> list
/// POST   /users                     -> create
/// GET    /users/{id}                -> get
/// PUT    /users/{id}                -> update
/// DELETE /users/{id}                -> deactivate
/// POST   /users/{id}/reset-password -> reset password
/// GET    /audit-logs                -> query audit trail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route("/audit-logs", get(audit::list_audit_logs))
        .layer(middleware::from_fn(csrf::require_csrf))
}
