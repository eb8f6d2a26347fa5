//! Resource repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_entity::resource::{NewResource, Resource, ResourceFilter, ResourcePatch};

use super::db_error;
use crate::stores::ResourceStore;

/// Repository for the `resources` table.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Resource, NewResource, ResourcePatch> for ResourceRepository {
    async fn create(&self, draft: NewResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (title, description, kind, url, file, department, subject, year, semester)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.kind)
        .bind(&draft.url)
        .bind(&draft.file)
        .bind(&draft.department)
        .bind(&draft.subject)
        .bind(&draft.year)
        .bind(draft.semester)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create resource"))
    }

    async fn update(&self, id: Uuid, patch: ResourcePatch) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                kind = COALESCE($4, kind),
                url = COALESCE($5, url),
                file = COALESCE($6, file),
                department = COALESCE($7, department),
                subject = COALESCE($8, subject),
                year = COALESCE($9, year),
                semester = COALESCE($10, semester),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.kind)
        .bind(patch.url)
        .bind(patch.file)
        .bind(patch.department)
        .bind(patch.subject)
        .bind(patch.year)
        .bind(patch.semester)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update resource"))?
        .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find resource by id"))
    }
}

#[async_trait]
impl SoftDelete<Resource> for ResourceRepository {
    async fn deactivate(&self, id: Uuid) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET is_active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to deactivate resource"))?
        .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }
}

#[async_trait]
impl ResourceStore for ResourceRepository {
    async fn list_active(&self, filter: &ResourceFilter) -> AppResult<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources
             WHERE is_active
               AND ($1::TEXT IS NULL OR department = $1)
               AND ($2::TEXT IS NULL OR year = $2)
               AND ($3::TEXT IS NULL OR subject = $3)
               AND ($4::resource_kind IS NULL OR kind = $4)
             ORDER BY created_at DESC, id DESC",
        )
        .bind(filter.department.as_deref())
        .bind(filter.year.as_deref())
        .bind(filter.subject.as_deref())
        .bind(filter.kind)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list resources"))
    }

    async fn record_download(&self, id: Uuid) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET download_count = download_count + 1
             WHERE id = $1 AND is_active
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to record resource download"))
    }
}
