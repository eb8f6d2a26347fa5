//! Blob locators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an uploaded blob lives: `/uploads/<folder>/<name>` or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobLocator(String);

impl BlobLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Locators with an `http` scheme belong to a remote object store.
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlobLocator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for BlobLocator {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_decides_remote() {
        assert!(BlobLocator::from("https://cdn.example.org/a.png").is_remote());
        assert!(BlobLocator::from("http://minio:9000/b/a.png").is_remote());
        assert!(!BlobLocator::from("/uploads/news/a.png").is_remote());
        assert!(BlobLocator::from("  ").is_empty());
    }
}
