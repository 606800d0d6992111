//! Handler for the `/api/categories` resource (read-only, seeded data).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use eventhubble_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}
