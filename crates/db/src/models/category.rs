//! Category lookup model.

use eventhubble_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A category row from the `categories` table. Referenced from events and
/// blog posts by name (a referential tag, not a foreign key).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub display_order: i32,
}
