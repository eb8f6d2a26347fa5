//! Incoming upload handles.

use bytes::Bytes;

use crate::category::UploadCategory;

/// A file decoded from a request, alive for one request only.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file arrived in (e.g. `file`, `image`).
    pub field_name: String,
    /// Client-supplied file name; only its extension is kept.
    pub original_name: String,
    /// Declared media type.
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(
        field_name: impl Into<String>,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            original_name: original_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// An upload that passed the category policy and size ceiling.
///
/// Only [`crate::UploadValidator`] can construct one, so holding a
/// `ValidatedUpload` proves the checks ran.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    category: UploadCategory,
    file: UploadedFile,
}

impl ValidatedUpload {
    pub(crate) fn new(category: UploadCategory, file: UploadedFile) -> Self {
        Self { category, file }
    }

    pub fn category(&self) -> UploadCategory {
        self.category
    }

    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Give the handle back unchanged.
    pub fn into_inner(self) -> (UploadCategory, UploadedFile) {
        (self.category, self.file)
    }
}
