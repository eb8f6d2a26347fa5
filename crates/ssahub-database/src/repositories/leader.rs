//! Leader repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_entity::leader::{Leader, LeaderPatch, NewLeader};

use super::db_error;
use crate::stores::LeaderStore;

/// Repository for the `leaders` table.
#[derive(Debug, Clone)]
pub struct LeaderRepository {
    pool: PgPool,
}

impl LeaderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Leader, NewLeader, LeaderPatch> for LeaderRepository {
    async fn create(&self, draft: NewLeader) -> AppResult<Leader> {
        sqlx::query_as::<_, Leader>(
            "INSERT INTO leaders (name, position, department, year, image, bio, email, phone, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&draft.name)
        .bind(&draft.position)
        .bind(&draft.department)
        .bind(&draft.year)
        .bind(&draft.image)
        .bind(&draft.bio)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create leader"))
    }

    async fn update(&self, id: Uuid, patch: LeaderPatch) -> AppResult<Leader> {
        sqlx::query_as::<_, Leader>(
            "UPDATE leaders SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                department = COALESCE($4, department),
                year = COALESCE($5, year),
                image = COALESCE($6, image),
                bio = COALESCE($7, bio),
                email = COALESCE($8, email),
                phone = COALESCE($9, phone),
                display_order = COALESCE($10, display_order),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.position)
        .bind(patch.department)
        .bind(patch.year)
        .bind(patch.image)
        .bind(patch.bio)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.display_order)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update leader"))?
        .ok_or_else(|| AppError::not_found(format!("Leader {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Leader>> {
        sqlx::query_as::<_, Leader>("SELECT * FROM leaders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find leader by id"))
    }
}

#[async_trait]
impl SoftDelete<Leader> for LeaderRepository {
    async fn deactivate(&self, id: Uuid) -> AppResult<Leader> {
        sqlx::query_as::<_, Leader>(
            "UPDATE leaders SET is_active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to deactivate leader"))?
        .ok_or_else(|| AppError::not_found(format!("Leader {id} not found")))
    }
}

#[async_trait]
impl LeaderStore for LeaderRepository {
    async fn list_active(&self) -> AppResult<Vec<Leader>> {
        sqlx::query_as::<_, Leader>(
            "SELECT * FROM leaders WHERE is_active ORDER BY display_order ASC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list leaders"))
    }
}
