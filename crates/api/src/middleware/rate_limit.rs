//! In-memory sliding-window rate limiter.
//!
//! State lives in an explicitly constructed [`RateLimiter`] service held in
//! `AppState` -- no module-level globals. Counters reset on process restart
//! and are not shared across instances, which is correct only for a
//! single-instance deployment.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, AuthError};
use crate::middleware::client_meta::ClientMeta;
use crate::state::AppState;

/// Rate limit window configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Window length in seconds (default: 900).
    pub window_secs: u64,
    /// Maximum requests per address within the window (default: 20).
    pub max_requests: usize,
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_WINDOW_SECS` / `RATE_LIMIT_MAX_REQUESTS`.
    pub fn from_env() -> Self {
        let window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        let max_requests: usize = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("RATE_LIMIT_MAX_REQUESTS must be a valid usize");

        Self {
            window_secs,
            max_requests,
        }
    }
}

/// Sliding-window counter keyed by client address.
///
/// Per address an ordered list of request instants. On each request,
/// entries older than the window are discarded, the request is recorded,
/// and the count is compared against the max. The runtime is
/// multi-threaded, so the table sits behind a `Mutex`; the lock is held
/// only for the prune-and-push, never across an await point.
pub struct RateLimiter {
    window: Duration,
    max_requests: usize,
    hits: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `addr` and decide whether to admit it.
    ///
    /// Returns `false` when the address has exceeded the max within the
    /// window. The rejected attempt is itself recorded (once) -- continued
    /// hammering keeps the window occupied.
    pub fn check(&self, addr: &str) -> bool {
        self.check_at(addr, Instant::now())
    }

    /// [`check`](Self::check) with an injected clock, so window expiry is
    /// testable without sleeping.
    fn check_at(&self, addr: &str, now: Instant) -> bool {
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let stamps = hits.entry(addr.to_string()).or_default();
        stamps.retain(|t| now.duration_since(*t) < self.window);
        stamps.push(now);
        stamps.len() <= self.max_requests
    }
}

/// Middleware applying the limiter to a route group.
///
/// Requests without a resolvable client address share one bucket; behind
/// the expected reverse proxy `X-Forwarded-For` is always present.
pub async fn limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let meta = ClientMeta::from_headers(request.headers());
    let addr = meta.ip_address.unwrap_or_else(|| "unknown".to_string());

    if !state.rate_limiter.check(&addr) {
        tracing::warn!(%addr, "Rate limit exceeded");
        return AppError::Auth(AuthError::RateLimitExceeded).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: usize, window_secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            window_secs,
            max_requests: max,
        })
    }

    #[test]
    fn admits_up_to_max_then_rejects() {
        let limiter = limiter(3, 60);
        let now = Instant::now();

        assert!(limiter.check_at("1.2.3.4", now));
        assert!(limiter.check_at("1.2.3.4", now));
        assert!(limiter.check_at("1.2.3.4", now));
        // The (N+1)-th request inside the window is rejected.
        assert!(!limiter.check_at("1.2.3.4", now));
    }

    #[test]
    fn addresses_are_independent() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.check_at("1.1.1.1", now));
        assert!(limiter.check_at("2.2.2.2", now));
        assert!(!limiter.check_at("1.1.1.1", now));
    }

    #[test]
    fn window_expiry_readmits() {
        let limiter = limiter(2, 60);
        let start = Instant::now();

        assert!(limiter.check_at("1.2.3.4", start));
        assert!(limiter.check_at("1.2.3.4", start));
        assert!(!limiter.check_at("1.2.3.4", start));

        // Past the window, old stamps are discarded and the address is
        // admitted again.
        let later = start + Duration::from_secs(61);
        assert!(limiter.check_at("1.2.3.4", later));
    }

    #[test]
    fn rejected_attempt_is_recorded_once() {
        let limiter = limiter(1, 60);
        let start = Instant::now();

        assert!(limiter.check_at("1.2.3.4", start));
        assert!(!limiter.check_at("1.2.3.4", start + Duration::from_secs(30)));

        // The rejection at t+30 was itself recorded: at t+61 the first
        // stamp has expired but the t+30 one has not, so the address is
        // still over the limit.
        assert!(!limiter.check_at("1.2.3.4", start + Duration::from_secs(61)));

        // Once every stamp has aged out, the address is clean.
        assert!(limiter.check_at("1.2.3.4", start + Duration::from_secs(200)));
    }
}
