//! Upload validation against category policy and size ceiling.

use tracing::debug;

use ssahub_core::config::storage::StorageConfig;
use ssahub_core::{AppError, AppResult};

use crate::category::UploadCategory;
use crate::upload::{UploadedFile, ValidatedUpload};

/// Accepts or rejects uploads before any bytes are persisted.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_bytes: u64,
}

impl UploadValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.max_upload_size_bytes)
    }

    /// Largest accepted upload in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check the declared media type first, then the size.
    pub fn validate(
        &self,
        category: UploadCategory,
        file: UploadedFile,
    ) -> AppResult<ValidatedUpload> {
        let policy = category.policy();
        if !policy.admits(&file.content_type) {
            debug!(
                category = %category,
                content_type = %file.content_type,
                "Rejected upload media type"
            );
            return Err(AppError::unsupported_media_type(format!(
                "'{}' is not accepted for {category}; only {} are allowed",
                file.content_type,
                policy.describe()
            )));
        }

        if file.size() > self.max_bytes {
            debug!(category = %category, size = file.size(), max = self.max_bytes, "Rejected oversized upload");
            return Err(AppError::payload_too_large(format!(
                "File is {} bytes; the limit is {} bytes",
                file.size(),
                self.max_bytes
            )));
        }

        Ok(ValidatedUpload::new(category, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use ssahub_core::ErrorKind;

    fn upload(content_type: &str, len: usize) -> UploadedFile {
        UploadedFile::new("file", "notes.bin", content_type, Bytes::from(vec![0u8; len]))
    }

    #[test]
    fn test_non_image_rejected_for_image_categories() {
        let v = UploadValidator::new(1024);
        for category in [
            UploadCategory::Leaders,
            UploadCategory::Events,
            UploadCategory::News,
            UploadCategory::General,
        ] {
            let err = v.validate(category, upload("application/pdf", 10)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);
        }
    }

    #[test]
    fn test_resources_accept_documents_and_images() {
        let v = UploadValidator::new(1024);
        assert!(v.validate(UploadCategory::Resources, upload("application/pdf", 10)).is_ok());
        assert!(v.validate(UploadCategory::Resources, upload("image/jpeg", 10)).is_ok());
        let err = v
            .validate(UploadCategory::Resources, upload("application/x-msdownload", 10))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let v = UploadValidator::new(100);
        assert!(v.validate(UploadCategory::News, upload("image/png", 100)).is_ok());
        let err = v.validate(UploadCategory::News, upload("image/png", 101)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PayloadTooLarge);
    }

    #[test]
    fn test_accepted_handle_is_unchanged() {
        let v = UploadValidator::new(100);
        let validated = v.validate(UploadCategory::Leaders, upload("image/png", 3)).unwrap();
        assert_eq!(validated.category(), UploadCategory::Leaders);
        let (_, file) = validated.into_inner();
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.size(), 3);
    }
}
