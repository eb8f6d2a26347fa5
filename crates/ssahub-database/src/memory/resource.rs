use async_trait::async_trait;
use uuid::Uuid;

use ssahub_core::traits::{RecordStore, SoftDelete};
use ssahub_core::{AppError, AppResult};
use ssahub_entity::resource::{NewResource, Resource, ResourceFilter, ResourcePatch};

use super::Table;
use crate::stores::ResourceStore;

#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    table: Table<Resource>,
}

#[async_trait]
impl RecordStore<Resource, NewResource, ResourcePatch> for MemoryResourceStore {
    async fn create(&self, draft: NewResource) -> AppResult<Resource> {
        let row = Resource::from_draft(draft);
        Ok(self.table.insert(row.id, row))
    }

    async fn update(&self, id: Uuid, patch: ResourcePatch) -> AppResult<Resource> {
        self.table
            .modify(id, |r| r.apply(patch))
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        Ok(self.table.get(id))
    }
}

#[async_trait]
impl SoftDelete<Resource> for MemoryResourceStore {
    async fn deactivate(&self, id: Uuid) -> AppResult<Resource> {
        self.table
            .modify(id, |r| {
                r.is_active = false;
                r.updated_at = chrono::Utc::now();
            })
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn list_active(&self, filter: &ResourceFilter) -> AppResult<Vec<Resource>> {
        let mut rows: Vec<Resource> = self
            .table
            .rows()
            .into_iter()
            .filter(|r| r.is_active && r.matches(filter))
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn record_download(&self, id: Uuid) -> AppResult<Option<Resource>> {
        Ok(self
            .table
            .modify_if(id, |r| r.is_active, |r| r.download_count += 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssahub_core::ErrorKind;
    use ssahub_entity::resource::{ResourceKind, Semester};

    fn draft(title: &str, kind: ResourceKind) -> NewResource {
        NewResource {
            title: title.into(),
            description: "d".into(),
            kind,
            url: "https://example.org/x".into(),
            file: String::new(),
            department: "CS".into(),
            subject: "Algorithms".into(),
            year: "Year 2".into(),
            semester: Semester::Both,
        }
    }

    #[tokio::test]
    async fn test_deactivated_hidden_from_listing_but_found_by_id() {
        let store = MemoryResourceStore::default();
        let a = store.create(draft("a", ResourceKind::Link)).await.unwrap();
        let b = store.create(draft("b", ResourceKind::Video)).await.unwrap();

        let gone = store.deactivate(a.id).await.unwrap();
        assert!(!gone.is_active);

        let listed = store.list_active(&ResourceFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, b.id);

        let direct = store.find_by_id(a.id).await.unwrap().unwrap();
        assert!(!direct.is_active);
    }

    #[tokio::test]
    async fn test_record_download_counts_active_only() {
        let store = MemoryResourceStore::default();
        let r = store.create(draft("a", ResourceKind::Link)).await.unwrap();

        assert_eq!(store.record_download(r.id).await.unwrap().unwrap().download_count, 1);
        assert_eq!(store.record_download(r.id).await.unwrap().unwrap().download_count, 2);

        store.deactivate(r.id).await.unwrap();
        assert!(store.record_download(r.id).await.unwrap().is_none());
        assert!(store.record_download(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let store = MemoryResourceStore::default();
        let err = store
            .update(Uuid::now_v7(), ResourcePatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = store.deactivate(Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_listing_filters_and_orders_newest_first() {
        let store = MemoryResourceStore::default();
        let first = store.create(draft("first", ResourceKind::Link)).await.unwrap();
        let second = store.create(draft("second", ResourceKind::Link)).await.unwrap();
        store.create(draft("video", ResourceKind::Video)).await.unwrap();

        let links = store
            .list_active(&ResourceFilter {
                kind: Some(ResourceKind::Link),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<Uuid> = links.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
