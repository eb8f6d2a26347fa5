//! Upload policy and blob backend configuration.

use serde::{Deserialize, Serialize};

/// Which backend persists uploaded bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files under `local.root_path`, served at `local.public_prefix`.
    #[default]
    Local,
    /// S3-compatible object storage.
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::S3 => write!(f, "s3"),
        }
    }
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend that receives new uploads.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Maximum accepted upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Locators that stand for "no image" and are never deleted.
    #[serde(default = "default_placeholders")]
    pub placeholder_locators: Vec<String>,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            max_upload_size_bytes: default_max_upload(),
            placeholder_locators: default_placeholders(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory that holds the category folders.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL path prefix under which `root_path` is served.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_prefix: default_public_prefix(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Endpoint URL for non-AWS services such as MinIO; empty uses AWS.
    #[serde(default)]
    pub endpoint: String,
    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Public URL that objects are reachable under, without trailing slash.
    #[serde(default)]
    pub public_base_url: String,
    /// Key prefix that scopes every object this service writes.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            public_base_url: String::new(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_placeholders() -> Vec<String> {
    vec!["/images/dummy.jpg".to_string()]
}

fn default_local_root() -> String {
    "./uploads".to_string()
}

fn default_public_prefix() -> String {
    "/uploads".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_key_prefix() -> String {
    "ssahub".to_string()
}
