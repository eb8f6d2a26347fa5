//! The blob store adapter that callers use for uploads and cleanup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ssahub_core::config::storage::{StorageBackend, StorageConfig};
use ssahub_core::traits::storage::StorageProvider;
use ssahub_core::{AppError, AppResult};

use crate::category::UploadCategory;
use crate::locator::BlobLocator;
use crate::naming::blob_key;
use crate::providers::LocalStorageProvider;
use crate::staged::StagedBlob;
use crate::upload::{UploadedFile, ValidatedUpload};
use crate::validator::UploadValidator;

/// What a delete request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend removed the object (or it was already gone).
    Deleted,
    /// Nothing to do: the locator was empty.
    Empty,
    /// The locator is a "no image" sentinel.
    Placeholder,
    /// No managed provider recognises the locator.
    Unmanaged,
    /// The backend failed; the error was logged and swallowed.
    Failed,
}

/// Persists validated uploads and removes blobs on a best-effort basis.
///
/// New uploads go to the `writer` provider. Deletes are routed to whichever
/// managed provider recognises the locator, so blobs written under an older
/// backend can still be cleaned up after a backend switch.
#[derive(Debug)]
pub struct BlobStore {
    writer: Arc<dyn StorageProvider>,
    managed: Vec<Arc<dyn StorageProvider>>,
    validator: UploadValidator,
    placeholders: Vec<String>,
}

impl BlobStore {
    pub fn new(writer: Arc<dyn StorageProvider>, validator: UploadValidator) -> Self {
        Self {
            managed: vec![Arc::clone(&writer)],
            writer,
            validator,
            placeholders: Vec::new(),
        }
    }

    /// Also route deletes to `provider` when it recognises a locator.
    pub fn with_managed(mut self, provider: Arc<dyn StorageProvider>) -> Self {
        self.managed.push(provider);
        self
    }

    /// Locators that must never be deleted.
    pub fn with_placeholders(mut self, placeholders: Vec<String>) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Build the store selected by configuration.
    ///
    /// The local provider is always created: it is the writer for the
    /// `local` backend and a delete-only fallback for the `s3` backend.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let validator = UploadValidator::from_config(config);
        let local: Arc<dyn StorageProvider> =
            Arc::new(LocalStorageProvider::from_config(&config.local).await?);

        let store = match config.backend {
            StorageBackend::Local => Self::new(local, validator),
            StorageBackend::S3 => {
                let remote = Self::remote_provider(config).await?;
                Self::new(remote, validator).with_managed(local)
            }
        };

        info!(backend = %config.backend, max_upload_bytes = config.max_upload_size_bytes, "Blob store ready");
        Ok(store.with_placeholders(config.placeholder_locators.clone()))
    }

    #[cfg(feature = "s3")]
    async fn remote_provider(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
        let provider = crate::providers::S3StorageProvider::from_config(&config.s3).await?;
        Ok(Arc::new(provider))
    }

    #[cfg(not(feature = "s3"))]
    async fn remote_provider(_config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
        Err(AppError::configuration(
            "storage.backend = \"s3\" requires the `s3` feature",
        ))
    }

    /// Name of the backend that receives new uploads.
    pub fn backend(&self) -> &str {
        self.writer.provider_type()
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    pub async fn health_check(&self) -> AppResult<bool> {
        self.writer.health_check().await
    }

    /// Persist a validated upload under its category folder.
    pub async fn store(&self, upload: ValidatedUpload) -> AppResult<BlobLocator> {
        let (category, file) = upload.into_inner();
        let key = blob_key(category, &file.field_name, &file.original_name);
        let locator = self
            .writer
            .put(&key, file.data, &file.content_type)
            .await
            .map_err(|e| {
                AppError::storage(format!("Could not store upload for {category}: {}", e.message))
            })?;

        info!(category = %category, locator = %locator, "Stored upload");
        Ok(BlobLocator::new(locator))
    }

    /// Validate and persist an upload, returning a reservation that must be
    /// committed once the owning record is saved, or released otherwise.
    pub async fn stage(
        self: &Arc<Self>,
        category: UploadCategory,
        file: UploadedFile,
    ) -> AppResult<StagedBlob> {
        let validated = self.validator.validate(category, file)?;
        let locator = self.store(validated).await?;
        Ok(StagedBlob::new(locator, Arc::clone(self)))
    }

    /// [`BlobStore::stage`] for an optional upload.
    pub async fn stage_optional(
        self: &Arc<Self>,
        category: UploadCategory,
        file: Option<UploadedFile>,
    ) -> AppResult<Option<StagedBlob>> {
        match file {
            Some(file) => self.stage(category, file).await.map(Some),
            None => Ok(None),
        }
    }

    /// Remove a blob. Never fails; backend errors are logged and swallowed.
    pub async fn delete(&self, locator: &BlobLocator) -> DeleteOutcome {
        if locator.is_empty() {
            return DeleteOutcome::Empty;
        }
        if self.placeholders.iter().any(|p| p == locator.as_str()) {
            debug!(locator = %locator, "Skipping placeholder locator");
            return DeleteOutcome::Placeholder;
        }

        let Some((provider, key)) = self
            .managed
            .iter()
            .find_map(|p| p.key_for(locator.as_str()).map(|k| (p, k)))
        else {
            debug!(locator = %locator, "Locator is not managed by this service; leaving it alone");
            return DeleteOutcome::Unmanaged;
        };

        match provider.delete(&key).await {
            Ok(()) => {
                info!(locator = %locator, provider = provider.provider_type(), "Deleted blob");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!(locator = %locator, error = %e, "Failed to delete blob; continuing");
                DeleteOutcome::Failed
            }
        }
    }

    /// Delete a locator held as a plain string, as stored on records.
    pub async fn delete_str(&self, locator: &str) -> DeleteOutcome {
        self.delete(&BlobLocator::from(locator)).await
    }

    /// Whether a managed provider currently holds the blob.
    pub async fn contains(&self, locator: &BlobLocator) -> AppResult<bool> {
        for provider in &self.managed {
            if let Some(key) = provider.key_for(locator.as_str()) {
                return provider.exists(&key).await;
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use ssahub_core::ErrorKind;

    /// Owns `https://broken.example/` and fails every operation.
    #[derive(Debug)]
    struct BrokenProvider;

    #[async_trait]
    impl StorageProvider for BrokenProvider {
        fn provider_type(&self) -> &str {
            "broken"
        }
        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
        async fn put(&self, _key: &str, _data: Bytes, _ct: &str) -> AppResult<String> {
            Err(AppError::storage("bucket unreachable"))
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::storage("bucket unreachable"))
        }
        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Err(AppError::storage("bucket unreachable"))
        }
        fn key_for(&self, locator: &str) -> Option<String> {
            locator
                .strip_prefix("https://broken.example/")
                .map(str::to_string)
        }
    }

    async fn local_store(dir: &tempfile::TempDir) -> Arc<BlobStore> {
        let local = LocalStorageProvider::new(dir.path(), "/uploads").await.unwrap();
        Arc::new(
            BlobStore::new(Arc::new(local), UploadValidator::new(1024))
                .with_placeholders(vec!["/images/dummy.jpg".into()]),
        )
    }

    fn png() -> UploadedFile {
        UploadedFile::new("image", "me.png", "image/png", Bytes::from_static(b"\x89PNG"))
    }

    #[tokio::test]
    async fn test_store_and_delete_local() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir).await;

        let staged = store.stage(UploadCategory::Leaders, png()).await.unwrap();
        let locator = staged.commit();
        assert!(locator.as_str().starts_with("/uploads/leaders/image-"));
        assert!(store.contains(&locator).await.unwrap());

        assert_eq!(store.delete(&locator).await, DeleteOutcome::Deleted);
        assert!(!store.contains(&locator).await.unwrap());
        // Idempotent.
        assert_eq!(store.delete(&locator).await, DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir).await;

        let pdf = UploadedFile::new("image", "cv.pdf", "application/pdf", Bytes::from_static(b"%PDF"));
        let err = store.stage(UploadCategory::News, pdf).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);
        assert!(!dir.path().join("news").exists());
    }

    #[tokio::test]
    async fn test_delete_skips_placeholders_and_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = local_store(&dir).await;

        assert_eq!(store.delete_str("").await, DeleteOutcome::Empty);
        assert_eq!(store.delete_str("/images/dummy.jpg").await, DeleteOutcome::Placeholder);
        assert_eq!(
            store.delete_str("https://www.youtube.com/watch?v=abc").await,
            DeleteOutcome::Unmanaged
        );
        assert_eq!(store.delete_str("/static/logo.png").await, DeleteOutcome::Unmanaged);
    }

    #[tokio::test]
    async fn test_remote_delete_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStorageProvider::new(dir.path(), "/uploads").await.unwrap();
        let store = BlobStore::new(Arc::new(BrokenProvider), UploadValidator::new(1024))
            .with_managed(Arc::new(local));

        assert_eq!(
            store.delete_str("https://broken.example/news/a.png").await,
            DeleteOutcome::Failed
        );
        // Legacy local locators still route to the local provider.
        assert_eq!(store.delete_str("/uploads/news/old.png").await, DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_storage_error() {
        let store = Arc::new(BlobStore::new(Arc::new(BrokenProvider), UploadValidator::new(1024)));
        let err = store.stage(UploadCategory::News, png()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StorageBackendUnavailable);
    }
}
