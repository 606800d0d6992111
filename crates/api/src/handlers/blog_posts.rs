//! Handlers for the `/api/blog-posts` resource.
//!
//! Same shape as events: public reads, editor mutations, admin deletes.
//! Slugs are derived from titles and intentionally not unique.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_core::types::DbId;
use eventhubble_db::models::blog_post::{BlogPostListParams, CreateBlogPost, UpdateBlogPost};
use eventhubble_db::repositories::BlogPostRepo;

use crate::audit::{self, snapshot, AuditEntry};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/blog-posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogPostListParams>,
) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/blog-posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/blog-posts/slug/{slug}
///
/// Slug lookup for public post pages. Slugs are not unique; the newest
/// published match wins.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id: 0,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/blog-posts
pub async fn create_post(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }

    let post = BlogPostRepo::create(&state.pool, &input).await?;

    tracing::info!(post_id = post.id, user_id = user.id, "Blog post created");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::CREATE,
            entity_type: "blog_post",
            entity_id: Some(post.id),
            before: None,
            after: snapshot(&post),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/blog-posts/{id}
pub async fn update_post(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<impl IntoResponse> {
    let before = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    let post = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    tracing::info!(post_id = id, user_id = user.id, "Blog post updated");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::UPDATE,
            entity_type: "blog_post",
            entity_id: Some(id),
            before: snapshot(&before),
            after: snapshot(&post),
        },
    );

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/blog-posts/{id}
///
/// Admin only.
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let before = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    let deleted = BlogPostRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }));
    }

    tracing::info!(post_id = id, user_id = admin.id, "Blog post deleted");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::DELETE,
            entity_type: "blog_post",
            entity_id: Some(id),
            before: snapshot(&before),
            after: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}
