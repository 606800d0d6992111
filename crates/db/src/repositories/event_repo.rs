//! Repository for the `events` table.

use eventhubble_core::slug::slugify;
use eventhubble_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventListParams, UpdateEvent};
use crate::pagination::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, category, location, event_date, \
                        image_url, source_url, is_active, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// List active events, newest event date first. Supports category and
    /// free-text filters. Inactive events never appear in the listing.
    pub async fn list(pool: &PgPool, params: &EventListParams) -> Result<Vec<Event>, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);
        let search_pattern = params.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE is_active = true
               AND ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2)
             ORDER BY event_date DESC NULLS LAST, created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&params.category)
            .bind(&search_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find an event by internal ID (active or not).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new event. The slug is derived from the title when the
    /// caller does not supply one; duplicate slugs are allowed.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let slug = input
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&input.title));

        let query = format!(
            "INSERT INTO events
                (title, slug, description, category, location, event_date, image_url, source_url, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(input.event_date)
            .bind(&input.image_url)
            .bind(&input.source_url)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update an event. Only non-`None` fields are applied; a title change
    /// does not regenerate the slug.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                event_date = COALESCE($6, event_date),
                image_url = COALESCE($7, image_url),
                source_url = COALESCE($8, source_url),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.location)
            .bind(input.event_date)
            .bind(&input.image_url)
            .bind(&input.source_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
