//! Handlers for the `/api/events` resource.
//!
//! Listing and single-record reads are public; mutations require the
//! editor role (delete requires admin) and are audited. The `/db` route
//! prefix is a legacy alias served by these same handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_core::audit::action_types;
use eventhubble_core::error::CoreError;
use eventhubble_core::types::DbId;
use eventhubble_db::models::event::{CreateEvent, EventListParams, UpdateEvent};
use eventhubble_db::repositories::EventRepo;

use crate::audit::{self, snapshot, AuditEntry};
use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/events
///
/// List active events, optionally filtered by category and free text.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/events
///
/// Create an event. The slug is derived from the title when absent.
pub async fn create_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(event_id = event.id, user_id = user.id, "Event created");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::CREATE,
            entity_type: "event",
            entity_id: Some(event.id),
            before: None,
            after: snapshot(&event),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/events/{id}
pub async fn update_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    // Pre-write snapshot for the audit trail.
    let before = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(event_id = id, user_id = user.id, "Event updated");
    audit::record(
        &state.pool,
        &user,
        &meta,
        AuditEntry {
            action: action_types::UPDATE,
            entity_type: "event",
            entity_id: Some(id),
            before: snapshot(&before),
            after: snapshot(&event),
        },
    );

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/events/{id}
///
/// Admin only.
pub async fn delete_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    meta: ClientMeta,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let before = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let deleted = EventRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Event", id }));
    }

    tracing::info!(event_id = id, user_id = admin.id, "Event deleted");
    audit::record(
        &state.pool,
        &admin,
        &meta,
        AuditEntry {
            action: action_types::DELETE,
            entity_type: "event",
            entity_id: Some(id),
            before: snapshot(&before),
            after: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}
