//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::Category;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, display_order";

/// Provides read operations for categories. Categories are seeded by
/// migration and referenced from events and posts by name.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY display_order, name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }
}
