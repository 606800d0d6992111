//! Handlers for the `/api/images` resource.
//!
//! Stores CDN-hosted image metadata only; the binary upload happens on the
//! frontend directly against the CDN.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_db::models::image::CreateImage;
use eventhubble_db::repositories::ImageRepo;

use crate::audit::{self, snapshot, AuditEntry};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/images
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let images = ImageRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/images
pub async fn create_image(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<CreateImage>,
) -> AppResult<impl IntoResponse> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("url is required".into())));
    }

    let image = ImageRepo::create(&state.pool, &input).await?;

    tracing::info!(image_id = image.id, user_id = user.id, "Image registered");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::CREATE,
            entity_type: "image",
            entity_id: Some(image.id),
            before: None,
            after: snapshot(&image),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}
