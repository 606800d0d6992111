//! Repository for the `images` table.

use sqlx::PgPool;

use crate::models::image::{CreateImage, Image};
use crate::pagination::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, url, alt_text, width, height, created_at";

/// Provides list/create operations for image metadata.
pub struct ImageRepo;

impl ImageRepo {
    /// List images, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Register a new image, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (filename, url, alt_text, width, height)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.filename)
            .bind(&input.url)
            .bind(&input.alt_text)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }
}
