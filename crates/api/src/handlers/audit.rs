//! Handler for the `/api/admin/audit-logs` resource (read-only).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_db::models::audit_log::AuditQuery;
use eventhubble_db::repositories::AuditRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/audit-logs
///
/// Query the audit trail with optional user/action/entity/time filters.
/// Admin only.
pub async fn list_audit_logs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AuditQuery>,
) -> AppResult<impl IntoResponse> {
    let page = AuditRepo::query(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: page }))
}
