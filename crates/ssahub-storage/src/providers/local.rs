//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use ssahub_core::config::storage::LocalStorageConfig;
use ssahub_core::error::{AppError, ErrorKind};
use ssahub_core::result::AppResult;
use ssahub_core::traits::storage::StorageProvider;

/// Stores blobs under a root directory that is served at a URL prefix.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
    /// Public path prefix, without trailing slash (e.g. `/uploads`).
    public_prefix: String,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: impl AsRef<Path>, public_prefix: &str) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageBackendUnavailable,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        let public_prefix = format!("/{}", public_prefix.trim_matches('/'));
        Ok(Self {
            root,
            public_prefix,
        })
    }

    pub async fn from_config(config: &LocalStorageConfig) -> AppResult<Self> {
        Self::new(&config.root_path, &config.public_prefix).await
    }

    /// Directory that holds the category folders.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path inside the root, refusing anything that escapes it.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(AppError::validation(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::StorageBackendUnavailable,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<String> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageBackendUnavailable,
                format!("Failed to write file: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote file");
        Ok(format!("{}/{}", self.public_prefix, key.trim_start_matches('/')))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::StorageBackendUnavailable,
                format!("Failed to delete file: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        Ok(fs::try_exists(&full_path).await.unwrap_or(false))
    }

    fn key_for(&self, locator: &str) -> Option<String> {
        let key = locator
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;
        self.resolve(key).ok().map(|_| key.to_string())
    }
}
