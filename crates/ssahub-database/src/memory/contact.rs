use std::cmp::Reverse;

use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::RecordStore;
use ssahub_core::{AppError, AppResult};
use ssahub_entity::contact::{ContactFilter, ContactMessage, ContactPatch, NewContactMessage};

use super::Table;
use crate::stores::ContactStore;

#[derive(Debug, Default)]
pub struct MemoryContactStore {
    table: Table<ContactMessage>,
}

#[async_trait]
impl RecordStore<ContactMessage, NewContactMessage, ContactPatch> for MemoryContactStore {
    async fn create(&self, draft: NewContactMessage) -> AppResult<ContactMessage> {
        let row = ContactMessage::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: ContactPatch) -> AppResult<ContactMessage> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("Contact message {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self, filter: &ContactFilter) -> AppResult<Vec<ContactMessage>> {
        let mut rows: Vec<ContactMessage> = self
            .table
            .rows()
            .into_iter()
            .filter(|m| filter.is_read.is_none_or(|read| read == m.is_read))
            .collect();
        rows.sort_by_key(|m| Reverse((m.created_at, m.id)));
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.table.remove(id).is_some())
    }
}
