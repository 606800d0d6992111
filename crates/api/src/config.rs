use crate::auth::jwt::JwtConfig;
use crate::middleware::rate_limit::RateLimitConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. Missing optional
/// values degrade with a logged warning; only `DATABASE_URL` (read in
/// `main`) is mandatory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether auth cookies carry the `Secure` attribute (default: `false`
    /// for local development over plain HTTP).
    pub cookie_secure: bool,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
    /// Rate limit window applied to `/api/auth`.
    pub rate_limit: RateLimitConfig,
    /// CDN base URL for uploaded media, when configured.
    pub cdn_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3001`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `COOKIE_SECURE`           | `false`                 |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `900`                   |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `20`                    |
    /// | `CDN_BASE_URL`            | unset (logged)          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let cdn_base_url = std::env::var("CDN_BASE_URL").ok();
        if cdn_base_url.is_none() {
            tracing::warn!("CDN_BASE_URL not set; image URLs are stored as provided");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            jwt: JwtConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cdn_base_url,
        }
    }
}
