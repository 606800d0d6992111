//! Event entity model and DTOs.

use eventhubble_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<Timestamp>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event. The slug is derived from the title when
/// not supplied.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<Timestamp>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<Timestamp>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Filter parameters for the public event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
