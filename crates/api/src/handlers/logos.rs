//! Handlers for the `/api/logos` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_db::models::logo::CreateLogo;
use eventhubble_db::repositories::LogoRepo;

use crate::audit::{self, snapshot, AuditEntry};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/logos
pub async fn list_logos(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let logos = LogoRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: logos }))
}

/// POST /api/logos
pub async fn create_logo(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<CreateLogo>,
) -> AppResult<impl IntoResponse> {
    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("url is required".into())));
    }

    let logo = LogoRepo::create(&state.pool, &input).await?;

    tracing::info!(logo_id = logo.id, user_id = user.id, "Logo registered");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::CREATE,
            entity_type: "logo",
            entity_id: Some(logo.id),
            before: None,
            after: snapshot(&logo),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: logo })))
}
