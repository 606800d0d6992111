use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every dependency is reachable, `"degraded"` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Whether the database answered a round-trip.
    pub database_connected: bool,
}

/// GET /health -- service liveness plus a database round-trip.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_connected = eventhubble_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if database_connected { "ok" } else { "degraded" },
        service: "eventhubble-api",
        version: env!("CARGO_PKG_VERSION"),
        database_connected,
    })
}

/// Mount health check routes (root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
