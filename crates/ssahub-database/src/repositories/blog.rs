//! Blog repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::RecordStore;
use ssahub_entity::blog::{Blog, BlogFilter, BlogPatch, NewBlog, Visibility};

use super::{contains_pattern, db_error};
use crate::stores::BlogStore;

/// Repository for the `blogs` table.
#[derive(Debug, Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Blog, NewBlog, BlogPatch> for BlogRepository {
    async fn create(&self, draft: NewBlog) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs (title, content, summary, author, image, category, tags, reading_time, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.summary)
        .bind(&draft.author)
        .bind(&draft.image)
        .bind(draft.category)
        .bind(&draft.tags)
        .bind(draft.reading_time)
        .bind(draft.is_published)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create blog"))
    }

    async fn update(&self, id: Uuid, patch: BlogPatch) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                summary = COALESCE($4, summary),
                author = COALESCE($5, author),
                image = COALESCE($6, image),
                category = COALESCE($7, category),
                tags = COALESCE($8, tags),
                reading_time = COALESCE($9, reading_time),
                is_published = COALESCE($10, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.summary)
        .bind(patch.author)
        .bind(patch.image)
        .bind(patch.category)
        .bind(patch.tags)
        .bind(patch.reading_time)
        .bind(patch.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update blog"))?
        .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find blog by id"))
    }
}

#[async_trait]
impl BlogStore for BlogRepository {
    async fn list(&self, filter: &BlogFilter) -> AppResult<Vec<Blog>> {
        let published = match filter.visibility {
            Visibility::Published => Some(true),
            Visibility::Unpublished => Some(false),
            Visibility::All => None,
        };
        sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs
             WHERE ($1::BOOLEAN IS NULL OR is_published = $1)
               AND ($2::blog_category IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM unnest(tags) AS t WHERE LOWER(t) = LOWER($3)))
               AND ($4::TEXT IS NULL
                    OR title ILIKE $4 OR content ILIKE $4 OR summary ILIKE $4)
             ORDER BY publish_date DESC, id DESC",
        )
        .bind(published)
        .bind(filter.category)
        .bind(filter.tag.as_deref())
        .bind(filter.search.as_deref().map(contains_pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list blogs"))
    }

    async fn popular(&self, limit: u32) -> AppResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs WHERE is_published
             ORDER BY views DESC, likes DESC, publish_date DESC
             LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list popular blogs"))
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            "SELECT * FROM blogs WHERE is_published ORDER BY publish_date DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list recent blogs"))
    }

    async fn record_view(&self, id: Uuid, include_unpublished: bool) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET views = views + 1
             WHERE id = $1 AND (is_published OR $2)
             RETURNING *",
        )
        .bind(id)
        .bind(include_unpublished)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to record blog view"))
    }

    async fn like(&self, id: Uuid) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blogs SET likes = likes + 1 WHERE id = $1 AND is_published RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to like blog"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>("DELETE FROM blogs WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to delete blog"))
    }
}
