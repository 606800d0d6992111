//! Handlers for the `/api/contact` resource.
//!
//! Submission is public (the only unauthenticated write in the API);
//! reading submissions is admin-only.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use eventhubble_core::error::CoreError;
use eventhubble_db::models::contact::CreateContactSubmission;
use eventhubble_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let create = CreateContactSubmission {
        name: input.name,
        email: input.email,
        subject: input.subject,
        message: input.message,
    };
    let submission = ContactRepo::create(&state.pool, &create).await?;

    tracing::info!(submission_id = submission.id, "Contact submission received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

/// GET /api/contact
///
/// Admin only.
pub async fn list_contact(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let submissions = ContactRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: submissions }))
}
