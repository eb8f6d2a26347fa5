use std::cmp::Reverse;

use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::RecordStore;
use ssahub_core::{AppError, AppResult};
use ssahub_entity::blog::{Blog, BlogFilter, BlogPatch, NewBlog};

use super::Table;
use crate::stores::BlogStore;

#[derive(Debug, Default)]
pub struct MemoryBlogStore {
    table: Table<Blog>,
}

impl MemoryBlogStore {
    fn published_newest_first(&self) -> Vec<Blog> {
        let mut rows: Vec<Blog> = self.table.rows().into_iter().filter(|b| b.is_published).collect();
        rows.sort_by_key(|b| Reverse((b.publish_date, b.id)));
        rows
    }
}

#[async_trait]
impl RecordStore<Blog, NewBlog, BlogPatch> for MemoryBlogStore {
    async fn create(&self, draft: NewBlog) -> AppResult<Blog> {
        let row = Blog::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: BlogPatch) -> AppResult<Blog> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Blog>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn list(&self, filter: &BlogFilter) -> AppResult<Vec<Blog>> {
        let mut rows: Vec<Blog> = self.table.rows().into_iter().filter(|b| b.matches(filter)).collect();
        rows.sort_by_key(|b| Reverse((b.publish_date, b.id)));
        Ok(rows)
    }

    async fn popular(&self, limit: u32) -> AppResult<Vec<Blog>> {
        let mut rows = self.published_newest_first();
        rows.sort_by_key(|b| Reverse((b.views, b.likes)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn recent(&self, limit: u32) -> AppResult<Vec<Blog>> {
        let mut rows = self.published_newest_first();
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn record_view(&self, id: Uuid, include_unpublished: bool) -> AppResult<Option<Blog>> {
        Ok(self
            .table
            .modify_if(id, |b| b.is_published || include_unpublished, |b| b.views += 1))
    }

    async fn like(&self, id: Uuid) -> AppResult<Option<Blog>> {
        Ok(self.table.modify_if(id, |b| b.is_published, |b| b.likes += 1))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Blog>> {
        Ok(self.table.remove(id))
    }
}
