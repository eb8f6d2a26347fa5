//! Shared fixtures for service tests.

use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;
use uuid::Uuid;

use ssahub_database::Stores;
use ssahub_entity::user::UserRole;
use ssahub_storage::providers::LocalStorageProvider;
use ssahub_storage::{BlobStore, UploadValidator, UploadedFile};

use crate::context::RequestContext;
use crate::{BlogService, ContactService, LeaderService, NewsService, ResourceService};

pub(crate) struct Fixture {
    pub stores: Stores,
    pub blobs: Arc<BlobStore>,
    dir: TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStorageProvider::new(dir.path(), "/uploads").await.unwrap();
        let blobs = BlobStore::new(Arc::new(local), UploadValidator::new(64 * 1024))
            .with_placeholders(vec!["/images/dummy.jpg".into()]);
        Self {
            stores: Stores::memory(),
            blobs: Arc::new(blobs),
            dir,
        }
    }

    pub fn resources(&self) -> ResourceService {
        ResourceService::new(self.stores.resources.clone(), self.blobs.clone())
    }

    pub fn leaders(&self) -> LeaderService {
        LeaderService::new(self.stores.leaders.clone(), self.blobs.clone())
    }

    pub fn news(&self) -> NewsService {
        NewsService::new(self.stores.news.clone(), self.blobs.clone())
    }

    pub fn blogs(&self) -> BlogService {
        BlogService::new(self.stores.blogs.clone(), self.blobs.clone())
    }

    pub fn contacts(&self) -> ContactService {
        ContactService::new(self.stores.contacts.clone())
    }

    /// Files currently stored under a category folder.
    pub fn blob_count(&self, folder: &str) -> usize {
        std::fs::read_dir(self.dir.path().join(folder))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub(crate) fn admin() -> RequestContext {
    RequestContext::new(Uuid::now_v7(), UserRole::Admin, "admin".into())
}

pub(crate) fn editor() -> RequestContext {
    RequestContext::new(Uuid::now_v7(), UserRole::Editor, "editor".into())
}

pub(crate) fn pdf_upload() -> UploadedFile {
    UploadedFile::new("file", "notes.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.7"))
}

pub(crate) fn png_upload(field: &str) -> UploadedFile {
    UploadedFile::new(field, "photo.PNG", "image/png", Bytes::from_static(b"\x89PNG\r\n"))
}
