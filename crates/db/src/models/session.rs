//! Login session model and DTOs.
//!
//! A session binds a user to the currently valid refresh-token hash. Raw
//! tokens are never stored; only SHA-256 fingerprints land in the table.

use eventhubble_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session at login.
pub struct CreateSession {
    pub user_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
