//! Storage provider trait for pluggable blob backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A blob backend that stores raw bytes under a key.
///
/// Keys are relative, slash-separated paths such as `news/image-1-2.png`.
/// Each provider knows how to turn a key into the public locator it hands
/// back to callers, and how to recognise which locators it owns.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes under `key` and return the public locator.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String>;

    /// Remove the object at `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Map a locator back to a key if, and only if, this provider manages it.
    fn key_for(&self, locator: &str) -> Option<String>;
}
