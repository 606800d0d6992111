//! Key-value site settings model.

use eventhubble_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A setting row. The key is the primary key; values are free-form JSON.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: Timestamp,
}

/// DTO for updating a setting's value.
#[derive(Debug, Deserialize)]
pub struct UpdateSetting {
    pub value: serde_json::Value,
}
