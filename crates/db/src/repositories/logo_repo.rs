//! Repository for the `logos` table.

use sqlx::PgPool;

use crate::models::logo::{CreateLogo, Logo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, variant, created_at";

/// Provides list/create operations for logos.
pub struct LogoRepo;

impl LogoRepo {
    /// List all logos, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Logo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM logos ORDER BY created_at DESC");
        sqlx::query_as::<_, Logo>(&query).fetch_all(pool).await
    }

    /// Register a new logo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLogo) -> Result<Logo, sqlx::Error> {
        let query = format!(
            "INSERT INTO logos (name, url, variant)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Logo>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.variant)
            .fetch_one(pool)
            .await
    }
}
