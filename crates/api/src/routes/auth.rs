//! Route definitions for the `/api/auth` resource.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::handlers::auth;
use crate::middleware::{csrf, rate_limit};
use crate::state::AppState;

/// Routes mounted at `/api/auth`. The whole group is rate limited; only
/// `logout` needs the CSRF check (login and refresh run before the client
/// holds a CSRF cookie, `me` is a safe method).
///
/// ```text
/// POST /login    -> login (public)
/// POST /refresh  -> refresh (cookie-driven)
/// POST /logout   -> logout (requires auth + CSRF)
/// GET  /me       -> current user (requires auth)
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh));

    let protected = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(middleware::from_fn(csrf::require_csrf));

    public
        .merge(protected)
        .layer(middleware::from_fn_with_state(state, rate_limit::limit))
}
