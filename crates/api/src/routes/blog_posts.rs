//! Route definitions for the `/api/blog-posts` resource.
//!
//! Mirrors the events route shape, including the legacy `/db` alias.

use axum::routing::get;
use axum::{middleware, Router};

use crate::handlers::blog_posts;
use crate::middleware::csrf;
use crate::state::AppState;

/// Routes mounted at `/api/blog-posts`.
///
/// ```text
/// GET    /             -> list (public)
/// GET    /slug/{slug}  -> get by slug (public)
/// GET    /{id}         -> get (public)
/// POST   /             -> create (editor+)
/// PUT    /{id}         -> update (editor+)
/// DELETE /{id}         -> delete (admin)
/// ...same under /db
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(blog_posts::list_posts).post(blog_posts::create_post),
        )
        .route("/slug/{slug}", get(blog_posts::get_post_by_slug))
        .route(
            "/{id}",
            get(blog_posts::get_post)
                .put(blog_posts::update_post)
                .delete(blog_posts::delete_post),
        )
        .route(
            "/db",
            get(blog_posts::list_posts).post(blog_posts::create_post),
        )
        .route(
            "/db/{id}",
            get(blog_posts::get_post)
                .put(blog_posts::update_post)
                .delete(blog_posts::delete_post),
        )
        .layer(middleware::from_fn(csrf::require_csrf))
}
