//! Two-phase blob reservation.
//!
//! A blob is stored before its owning record is written. The caller then
//! either commits the reservation (the record now references the blob) or
//! releases it (the record write failed, so the blob is deleted).

use std::sync::Arc;

use tracing::warn;

use crate::blob_store::{BlobStore, DeleteOutcome};
use crate::locator::BlobLocator;

/// A stored blob not yet referenced by any record.
#[must_use = "a staged blob must be committed or released"]
#[derive(Debug)]
pub struct StagedBlob {
    locator: BlobLocator,
    store: Arc<BlobStore>,
    armed: bool,
}

impl StagedBlob {
    pub(crate) fn new(locator: BlobLocator, store: Arc<BlobStore>) -> Self {
        Self {
            locator,
            store,
            armed: true,
        }
    }

    pub fn locator(&self) -> &BlobLocator {
        &self.locator
    }

    /// The owning record was saved; keep the blob.
    pub fn commit(mut self) -> BlobLocator {
        self.armed = false;
        self.locator.clone()
    }

    /// The owning record was not saved; delete the blob.
    pub async fn release(mut self) -> DeleteOutcome {
        self.armed = false;
        self.store.delete(&self.locator).await
    }
}

impl Drop for StagedBlob {
    fn drop(&mut self) {
        if self.armed {
            warn!(
                locator = %self.locator,
                "Staged blob dropped without commit or release; it is now orphaned"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::UploadCategory;
    use crate::providers::LocalStorageProvider;
    use crate::upload::UploadedFile;
    use crate::validator::UploadValidator;
    use bytes::Bytes;

    async fn store(dir: &tempfile::TempDir) -> Arc<BlobStore> {
        let local = LocalStorageProvider::new(dir.path(), "/uploads").await.unwrap();
        Arc::new(BlobStore::new(Arc::new(local), UploadValidator::new(1024)))
    }

    fn pdf() -> UploadedFile {
        UploadedFile::new("file", "notes.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.7"))
    }

    #[tokio::test]
    async fn test_release_deletes_the_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let staged = store.stage(UploadCategory::Resources, pdf()).await.unwrap();
        let locator = staged.locator().clone();
        assert!(store.contains(&locator).await.unwrap());

        assert_eq!(staged.release().await, DeleteOutcome::Deleted);
        assert!(!store.contains(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_keeps_the_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let staged = store.stage(UploadCategory::Resources, pdf()).await.unwrap();
        let locator = staged.commit();
        assert!(store.contains(&locator).await.unwrap());
    }
}
