use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_core::{AppError, AppResult};
use ssahub_entity::news::{News, NewsFilter, NewsPatch, NewNews};

use super::Table;
use crate::stores::NewsStore;

#[derive(Debug, Default)]
pub struct MemoryNewsStore {
    table: Table<News>,
}

#[async_trait]
impl RecordStore<News, NewNews, NewsPatch> for MemoryNewsStore {
    async fn create(&self, draft: NewNews) -> AppResult<News> {
        let row = News::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: NewsPatch) -> AppResult<News> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("News {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl SoftDelete<News> for MemoryNewsStore {
    async fn deactivate(&self, id: Uuid) -> AppResult<News> {
        self.table
            .modify(id, |r| {
                r.is_published = false;
                r.updated_at = chrono::Utc::now();
            })
            .ok_or_else(|| AppError::not_found(format!("News {id} not found")))
    }
}

#[async_trait]
impl NewsStore for MemoryNewsStore {
    async fn list_published(&self, filter: &NewsFilter) -> AppResult<Vec<News>> {
        let mut rows: Vec<News> = self
            .table
            .rows()
            .into_iter()
            .filter(|r| r.is_published && filter.category.is_none_or(|c| c == r.category))
            .collect();
        rows.sort_by(|a, b| (b.publish_date, b.id).cmp(&(a.publish_date, a.id)));
        rows.truncate(filter.limit as usize);
        Ok(rows)
    }
}
