use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_core::{AppError, AppResult};
use ssahub_entity::leader::{Leader, LeaderPatch, NewLeader};

use super::Table;
use crate::stores::LeaderStore;

#[derive(Debug, Default)]
pub struct MemoryLeaderStore {
    table: Table<Leader>,
}

#[async_trait]
impl RecordStore<Leader, NewLeader, LeaderPatch> for MemoryLeaderStore {
    async fn create(&self, draft: NewLeader) -> AppResult<Leader> {
        let row = Leader::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: LeaderPatch) -> AppResult<Leader> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("Leader {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Leader>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl SoftDelete<Leader> for MemoryLeaderStore {
    async fn deactivate(&self, id: Uuid) -> AppResult<Leader> {
        self.table
            .modify(id, |r| {
                r.is_active = false;
                r.updated_at = chrono::Utc::now();
            })
            .ok_or_else(|| AppError::not_found(format!("Leader {id} not found")))
    }
}

#[async_trait]
impl LeaderStore for MemoryLeaderStore {
    async fn list_active(&self) -> AppResult<Vec<Leader>> {
        let mut rows: Vec<Leader> = self.table.rows().into_iter().filter(|r| r.is_active).collect();
        rows.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}
