//! Site logo model and DTOs.

use eventhubble_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A logo row from the `logos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Logo {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub variant: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for registering a new logo.
#[derive(Debug, Deserialize)]
pub struct CreateLogo {
    pub name: String,
    pub url: String,
    pub variant: Option<String>,
}
