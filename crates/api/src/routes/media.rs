//! Route definitions for the `/api/images` and `/api/logos` resources.

use axum::routing::get;
use axum::{middleware, Router};

use crate::handlers::{images, logos};
use crate::middleware::csrf;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET  /images -> list (public)
/// POST /images -> register (editor+)
/// GET  /logos  -> list (public)
/// POST /logos  -> register (editor+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(images::list_images).post(images::create_image))
        .route("/logos", get(logos::list_logos).post(logos::create_logo))
        .layer(middleware::from_fn(csrf::require_csrf))
}
