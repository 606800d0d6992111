//! Route definitions for the `/api/events` resource.
//!
//! The `/db` prefix is a legacy alias from the era when events had two
//! persistence paths; both prefixes serve the same relational store.

use axum::routing::get;
use axum::{middleware, Router};

use crate::handlers::events;
use crate::middleware::csrf;
use crate::state::AppState;

/// Routes mounted at `/api/events`. CSRF applies to the whole group; safe
/// methods pass the check trivially.
///
/// ```text
/// GET    /           -> list (public)
/// GET    /{id}       -> get (public)
/// POST   /           -> create (editor+)
/// PUT    /{id}       -> update (editor+)
/// DELETE /{id}       -> delete (admin)
/// ...same under /db
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/db", get(events::list_events).post(events::create_event))
        .route(
            "/db/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .layer(middleware::from_fn(csrf::require_csrf))
}
