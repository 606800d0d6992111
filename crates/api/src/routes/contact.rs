//! Route definitions for the `/api/contact` resource.
//!
//! The POST is the one public write in the API and is deliberately outside
//! the CSRF check: anonymous visitors hold no CSRF cookie.

use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/api/contact`.
///
/// ```text
/// POST / -> submit (public)
/// GET  / -> list (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(contact::list_contact).post(contact::submit_contact),
    )
}
