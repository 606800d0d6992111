pub mod admin;
pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod contact;
pub mod events;
pub mod health;
pub mod media;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public, rate limited)
/// /auth/refresh                      refresh (rate limited)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
///
/// /events(/db)                       list, create
/// /events(/db)/{id}                  get, update, delete
///
/// /blog-posts(/db)                   list, create
/// /blog-posts/slug/{slug}            get by slug
/// /blog-posts(/db)/{id}              get, update, delete
///
/// /images                            list, register
/// /logos                             list, register
/// /categories                        list
/// /settings                          list
/// /settings/{key}                    upsert (admin)
/// /contact                           submit (public), list (admin)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get, update, deactivate
/// /admin/users/{id}/reset-password   reset password
/// /admin/audit-logs                  query audit trail
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/events", events::router())
        .nest("/blog-posts", blog_posts::router())
        .merge(media::router())
        .nest("/categories", categories::router())
        .nest("/settings", settings::router())
        .nest("/contact", contact::router())
        .nest("/admin", admin::router())
}
