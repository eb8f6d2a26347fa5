//! Contact message repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::RecordStore;
use ssahub_entity::contact::{ContactFilter, ContactMessage, ContactPatch, NewContactMessage};

use super::db_error;
use crate::stores::ContactStore;

/// Repository for the `contact_messages` table.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<ContactMessage, NewContactMessage, ContactPatch> for ContactRepository {
    async fn create(&self, draft: NewContactMessage) -> AppResult<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "INSERT INTO contact_messages (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.subject)
        .bind(&draft.message)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to save contact message"))
    }

    async fn update(&self, id: Uuid, patch: ContactPatch) -> AppResult<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET
                is_read = COALESCE($2, is_read),
                response = COALESCE($3, response),
                responded_at = COALESCE($4, responded_at),
                responded_by = COALESCE($5, responded_by),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.is_read)
        .bind(patch.response)
        .bind(patch.responded_at)
        .bind(patch.responded_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update contact message"))?
        .ok_or_else(|| AppError::not_found(format!("Contact message {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find contact message"))
    }
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn list(&self, filter: &ContactFilter) -> AppResult<Vec<ContactMessage>> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages
             WHERE ($1::BOOLEAN IS NULL OR is_read = $1)
             ORDER BY created_at DESC",
        )
        .bind(filter.is_read)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list contact messages"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete contact message"))?;
        Ok(result.rows_affected() > 0)
    }
}
