//! S3-compatible object storage provider.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use ssahub_core::config::storage::S3StorageConfig;
use ssahub_core::error::{AppError, ErrorKind};
use ssahub_core::result::AppResult;
use ssahub_core::traits::storage::StorageProvider;

/// Stores blobs in a bucket and hands out public object URLs.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
    /// Public base URL without trailing slash.
    public_base_url: String,
    /// Prefix prepended to every key, without surrounding slashes.
    key_prefix: String,
}

impl S3StorageProvider {
    /// Build a client from static credentials and an optional custom endpoint.
    pub async fn from_config(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket must be set"));
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "ssahub",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.clone());
        }
        let shared = loader.load().await;

        let client = Client::from_conf(
            aws_sdk_s3::config::Builder::from(&shared)
                .force_path_style(!config.endpoint.is_empty())
                .build(),
        );

        let public_base_url = if config.public_base_url.is_empty() {
            default_public_url(config)
        } else {
            config.public_base_url.trim_end_matches('/').to_string()
        };

        info!(bucket = %config.bucket, public_base_url = %public_base_url, "S3 storage configured");

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url,
            key_prefix: config.key_prefix.trim_matches('/').to_string(),
        })
    }

    fn object_key(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.key_prefix, key)
        }
    }

    fn backend_error(
        message: String,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> AppError {
        AppError::with_source(ErrorKind::StorageBackendUnavailable, message, err)
    }
}

/// Virtual-hosted URL for AWS, path-style URL for custom endpoints.
fn default_public_url(config: &S3StorageConfig) -> String {
    if config.endpoint.is_empty() {
        format!("https://{}.s3.{}.amazonaws.com", config.bucket, config.region)
    } else {
        format!("{}/{}", config.endpoint.trim_end_matches('/'), config.bucket)
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        let object_key = self.object_key(key);
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| Self::backend_error(format!("Failed to upload object: {object_key}"), e))?;

        debug!(key = %object_key, bytes = size, "Uploaded object");
        Ok(format!("{}/{}", self.public_base_url, object_key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let object_key = self.object_key(key);
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| Self::backend_error(format!("Failed to delete object: {object_key}"), e))?;

        debug!(key = %object_key, "Deleted object");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let object_key = self.object_key(key);
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|s| s.is_not_found()) => Ok(false),
            Err(e) => Err(Self::backend_error(
                format!("Failed to stat object: {object_key}"),
                e,
            )),
        }
    }

    /// Only URLs under the public base and key prefix are ours to delete.
    fn key_for(&self, locator: &str) -> Option<String> {
        let object_key = locator
            .strip_prefix(self.public_base_url.as_str())?
            .strip_prefix('/')?;
        let key = if self.key_prefix.is_empty() {
            object_key
        } else {
            object_key
                .strip_prefix(self.key_prefix.as_str())?
                .strip_prefix('/')?
        };
        (!key.is_empty()).then(|| key.to_string())
    }
}
