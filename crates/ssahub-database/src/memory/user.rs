use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::RecordStore;
use ssahub_core::{AppError, AppResult};
use ssahub_entity::user::{NewUser, User, UserPatch};

use super::Table;
use crate::stores::UserStore;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: Table<User>,
}

#[async_trait]
impl RecordStore<User, NewUser, UserPatch> for MemoryUserStore {
    async fn create(&self, draft: NewUser) -> AppResult<User> {
        let taken = self.table.rows().into_iter().any(|u| {
            u.email.eq_ignore_ascii_case(&draft.email)
                || u.username.eq_ignore_ascii_case(&draft.username)
        });
        if taken {
            return Err(AppError::conflict("A user with that email or username already exists"));
        }
        let row = User::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .table
            .rows()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .table
            .rows()
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut rows = self.table.rows();
        rows.sort_by_key(|u| (u.created_at, u.id));
        Ok(rows)
    }
}
