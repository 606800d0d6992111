//! Handlers for the `/api/settings` resource.
//!
//! Reads are public (the frontend needs site settings before login);
//! writes are admin-only and audited.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_core::audit::action_types;
use eventhubble_db::models::setting::UpdateSetting;
use eventhubble_db::repositories::SettingRepo;

use crate::audit::{self, snapshot, AuditEntry};
use crate::error::AppResult;
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/settings
pub async fn list_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/settings/{key}
///
/// Upsert a setting's value. Admin only.
pub async fn update_setting(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(key): Path<String>,
    Json(input): Json<UpdateSetting>,
) -> AppResult<impl IntoResponse> {
    let before = SettingRepo::find_by_key(&state.pool, &key).await?;
    let setting = SettingRepo::upsert(&state.pool, &key, &input.value).await?;

    tracing::info!(%key, user_id = admin.id, "Setting updated");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::UPDATE,
            entity_type: "setting",
            entity_id: None,
            before: before.as_ref().and_then(|s| snapshot(s)),
            after: snapshot(&setting),
        },
    );

    Ok(Json(DataResponse { data: setting }))
}
