//! Repository for the `blog_posts` table.

use eventhubble_core::slug::slugify;
use eventhubble_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog_post::{BlogPost, BlogPostListParams, CreateBlogPost, UpdateBlogPost};
use crate::pagination::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, excerpt, author, category, \
                        image_url, is_published, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// List published posts, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &BlogPostListParams,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);
        let search_pattern = params.search.as_ref().map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE is_published = true
               AND ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR content ILIKE $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&params.category)
            .bind(&search_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a post by internal ID (published or not).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the most recent published post with the given slug.
    ///
    /// Slugs are not unique; when duplicates exist the newest post wins.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE slug = $1 AND is_published = true
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new post. The slug is derived from the title when the
    /// caller does not supply one; duplicate slugs are allowed.
    pub async fn create(pool: &PgPool, input: &CreateBlogPost) -> Result<BlogPost, sqlx::Error> {
        let slug = input
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&input.title));

        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, content, excerpt, author, category, image_url, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(&slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.author)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied; a title change
    /// does not regenerate the slug.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                excerpt = COALESCE($4, excerpt),
                author = COALESCE($5, author),
                category = COALESCE($6, category),
                image_url = COALESCE($7, image_url),
                is_published = COALESCE($8, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.author)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
