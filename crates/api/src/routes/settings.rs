//! Route definitions for the `/api/settings` resource.

use axum::routing::{get, put};
use axum::{middleware, Router};

use crate::handlers::settings;
use crate::middleware::csrf;
use crate::state::AppState;

/// Routes mounted at `/api/settings`.
///
/// ```text
/// GET /        -> list (public)
/// PUT /{key}   -> upsert (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list_settings))
        .route("/{key}", put(settings::update_setting))
        .layer(middleware::from_fn(csrf::require_csrf))
}
