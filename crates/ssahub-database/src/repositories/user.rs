//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_core::result::AppResult;
use ssahub_core::traits::RecordStore;
use ssahub_entity::user::{NewUser, User, UserPatch};

use super::db_error;
use crate::stores::UserStore;

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<User, NewUser, UserPatch> for UserRepository {
    async fn create(&self, draft: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, LOWER($2), $3, $4)
             RETURNING *",
        )
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .bind(draft.role)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create user"))
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                password_hash = COALESCE($2, password_hash),
                role = COALESCE($3, role),
                is_active = COALESCE($4, is_active),
                last_login_at = COALESCE($5, last_login_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.password_hash)
        .bind(patch.role)
        .bind(patch.is_active)
        .bind(patch.last_login_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by id"))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by email"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user by username"))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))
    }
}
