//! News repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_entity::news::{News, NewsFilter, NewsPatch, NewNews};

use super::db_error;
use crate::stores::NewsStore;

/// Repository for the `news` table.
#[derive(Debug, Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<News, NewNews, NewsPatch> for NewsRepository {
    async fn create(&self, draft: NewNews) -> AppResult<News> {
        sqlx::query_as::<_, News>(
            "INSERT INTO news (title, summary, content, image, author, category, is_published, publish_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
             RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.summary)
        .bind(&draft.content)
        .bind(&draft.image)
        .bind(&draft.author)
        .bind(draft.category)
        .bind(draft.is_published)
        .bind(draft.publish_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create news"))
    }

    async fn update(&self, id: Uuid, patch: NewsPatch) -> AppResult<News> {
        sqlx::query_as::<_, News>(
            "UPDATE news SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                content = COALESCE($4, content),
                image = COALESCE($5, image),
                author = COALESCE($6, author),
                category = COALESCE($7, category),
                is_published = COALESCE($8, is_published),
                publish_date = COALESCE($9, publish_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.summary)
        .bind(patch.content)
        .bind(patch.image)
        .bind(patch.author)
        .bind(patch.category)
        .bind(patch.is_published)
        .bind(patch.publish_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update news"))?
        .ok_or_else(|| AppError::not_found(format!("News {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find news by id"))
    }
}

#[async_trait]
impl SoftDelete<News> for NewsRepository {
    async fn deactivate(&self, id: Uuid) -> AppResult<News> {
        sqlx::query_as::<_, News>(
            "UPDATE news SET is_published = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to unpublish news"))?
        .ok_or_else(|| AppError::not_found(format!("News {id} not found")))
    }
}

#[async_trait]
impl NewsStore for NewsRepository {
    async fn list_published(&self, filter: &NewsFilter) -> AppResult<Vec<News>> {
        sqlx::query_as::<_, News>(
            "SELECT * FROM news
             WHERE is_published AND ($1::news_category IS NULL OR category = $1)
             ORDER BY publish_date DESC
             LIMIT $2",
        )
        .bind(filter.category)
        .bind(i64::from(filter.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list news"))
    }
}
