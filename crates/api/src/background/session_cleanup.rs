//! Periodic deletion of expired and deactivated sessions.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use eventhubble_db::repositories::SessionRepo;
use eventhubble_db::DbPool;

/// How often the cleanup pass runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cleanup loop until `cancel` fires.
///
/// Failures are logged and the loop continues; a transient database error
/// must not kill the task for the life of the process.
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
    // The first tick fires immediately; skip it so startup stays quiet.
    interval.tick().await;

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Session cleanup task stopping");
                break;
            }
            _ = interval.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(0) => {}
                    Ok(deleted) => {
                        tracing::info!(deleted, "Expired sessions cleaned up");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Session cleanup failed");
                    }
                }
            }
        }
    }
}
