use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventhubble_api::auth::password::hash_password;
use eventhubble_api::background;
use eventhubble_api::config::ServerConfig;
use eventhubble_api::middleware::rate_limit::RateLimiter;
use eventhubble_api::router::build_app_router;
use eventhubble_api::state::AppState;
use eventhubble_core::roles::ROLE_ADMIN;
use eventhubble_db::models::user::CreateUser;
use eventhubble_db::repositories::UserRepo;
use eventhubble_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventhubble_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database (the one mandatory external dependency) ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = eventhubble_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    eventhubble_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    eventhubble_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await;

    // --- App state ---
    let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        rate_limiter,
    };

    // --- Background session cleanup ---
    let cleanup_cancel = tokio_util::sync::CancellationToken::new();
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        pool.clone(),
        cleanup_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cleanup_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Seed the default admin account when the users table is empty.
///
/// Runs at startup rather than in a migration so the password hash is
/// generated fresh (Argon2id with a random salt) instead of being a fixed
/// string checked into the repo. Credentials come from `ADMIN_EMAIL` /
/// `ADMIN_PASSWORD`, defaulting to the development pair.
async fn bootstrap_admin(pool: &DbPool) {
    let count = match UserRepo::count(pool).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, "Could not count users; skipping admin bootstrap");
            return;
        }
    };
    if count > 0 {
        return;
    }

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@eventhubble.com".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set; seeding admin with the development password");
        "admin123".to_string()
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "Could not hash admin password; skipping bootstrap");
            return;
        }
    };

    let input = CreateUser {
        email: email.clone(),
        password_hash,
        full_name: "Site Admin".to_string(),
        role: ROLE_ADMIN.to_string(),
    };
    match UserRepo::create(pool, &input).await {
        Ok(user) => tracing::info!(user_id = user.id, %email, "Seeded default admin account"),
        Err(e) => tracing::error!(error = %e, "Could not seed admin account"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
