//! Repository for the `sessions` table.

use eventhubble_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, access_token_hash, refresh_token_hash, expires_at, \
                        is_active, ip_address, user_agent, created_at, updated_at";

/// Provides CRUD operations for login sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, access_token_hash, refresh_token_hash, expires_at, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.access_token_hash)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find the most recent active, unexpired session for a user.
    ///
    /// The refresh flow consults at most one session per user: the latest
    /// active row. Both `is_active` and `expires_at` are checked here; an
    /// active-but-expired session is never returned.
    pub async fn find_active_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE user_id = $1
               AND is_active = true
               AND expires_at > NOW()
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Rotate a session's token hashes and extend its expiry.
    ///
    /// The UPDATE is guarded on the *old* refresh hash, so two refresh
    /// requests racing on the same stale token cannot both rotate: the loser
    /// matches zero rows. Returns `true` if the rotation was applied.
    pub async fn rotate(
        pool: &PgPool,
        id: DbId,
        old_refresh_hash: &str,
        new_access_hash: &str,
        new_refresh_hash: &str,
        new_expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET
                access_token_hash = $3,
                refresh_token_hash = $4,
                expires_at = $5,
                updated_at = NOW()
             WHERE id = $1
               AND refresh_token_hash = $2
               AND is_active = true",
        )
        .bind(id)
        .bind(old_refresh_hash)
        .bind(new_access_hash)
        .bind(new_refresh_hash)
        .bind(new_expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate a single session. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = false, updated_at = NOW()
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate every session for a user (logout / password change).
    /// Returns the count of deactivated sessions.
    pub async fn deactivate_all_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = false, updated_at = NOW()
             WHERE user_id = $1 AND is_active = true",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired or deactivated sessions. Returns the count of deleted
    /// rows. Called by the background cleanup task.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE expires_at < NOW() OR is_active = false")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
