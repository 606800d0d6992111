use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The rate limiter is an explicitly constructed service whose
/// lifecycle is tied to process start/stop; there is no module-level
/// global state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eventhubble_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// In-memory sliding-window rate limiter for `/api/auth`.
    pub rate_limiter: Arc<RateLimiter>,
}
