//! Uploaded image metadata model and DTOs.

use eventhubble_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An image row from the `images` table. Binary data lives on the CDN;
/// only metadata is stored here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub filename: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for registering a new image.
#[derive(Debug, Deserialize)]
pub struct CreateImage {
    pub filename: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}
