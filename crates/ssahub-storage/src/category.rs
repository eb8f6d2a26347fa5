//! Upload categories and their media policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ssahub_core::AppError;

/// Document media types accepted for resources in addition to images.
pub const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
];

/// Which media types a category admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPolicy {
    /// Any `image/*` type.
    ImagesOnly,
    /// Any `image/*` type or one of [`DOCUMENT_TYPES`].
    ImagesAndDocuments,
}

impl MediaPolicy {
    /// Check a declared media type. Case and parameters are ignored.
    pub fn admits(&self, media_type: &str) -> bool {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence.starts_with("image/") && essence.len() > "image/".len() {
            return true;
        }
        match self {
            Self::ImagesOnly => false,
            Self::ImagesAndDocuments => DOCUMENT_TYPES.contains(&essence.as_str()),
        }
    }

    /// Short human description used in rejection messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ImagesOnly => "image files",
            Self::ImagesAndDocuments => "images, PDF, Word, PowerPoint, Excel, or plain text files",
        }
    }
}

/// The closed set of namespaces uploads are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadCategory {
    Leaders,
    Events,
    News,
    Resources,
    General,
    Blogs,
}

/// Folder name and policy per category, resolved once here.
static POLICY_TABLE: [(UploadCategory, &str, MediaPolicy); 6] = [
    (UploadCategory::Leaders, "leaders", MediaPolicy::ImagesOnly),
    (UploadCategory::Events, "events", MediaPolicy::ImagesOnly),
    (UploadCategory::News, "news", MediaPolicy::ImagesOnly),
    (UploadCategory::Resources, "resources", MediaPolicy::ImagesAndDocuments),
    (UploadCategory::General, "general", MediaPolicy::ImagesOnly),
    (UploadCategory::Blogs, "blogs", MediaPolicy::ImagesOnly),
];

impl UploadCategory {
    /// Every category, in table order.
    pub fn all() -> impl Iterator<Item = UploadCategory> {
        POLICY_TABLE.iter().map(|(c, _, _)| *c)
    }

    fn entry(&self) -> &'static (UploadCategory, &'static str, MediaPolicy) {
        // Rows are in declaration order.
        &POLICY_TABLE[*self as usize]
    }

    /// Folder under which this category's blobs are stored.
    pub fn folder(&self) -> &'static str {
        self.entry().1
    }

    /// Media policy applied to this category's uploads.
    pub fn policy(&self) -> MediaPolicy {
        self.entry().2
    }
}

impl fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

impl FromStr for UploadCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        POLICY_TABLE
            .iter()
            .find(|(_, folder, _)| *folder == wanted)
            .map(|(c, _, _)| *c)
            .ok_or_else(|| AppError::validation(format!("Unknown upload category: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_category() {
        assert_eq!(UploadCategory::all().count(), 6);
        for (idx, (category, _, _)) in POLICY_TABLE.iter().enumerate() {
            assert_eq!(*category as usize, idx);
        }
        for category in UploadCategory::all() {
            assert_eq!(category.folder().parse::<UploadCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_image_only_categories() {
        for category in [
            UploadCategory::Leaders,
            UploadCategory::Events,
            UploadCategory::News,
            UploadCategory::General,
            UploadCategory::Blogs,
        ] {
            let policy = category.policy();
            assert!(policy.admits("image/png"), "{category}");
            assert!(!policy.admits("application/pdf"), "{category}");
            assert!(!policy.admits("text/plain"), "{category}");
        }
    }

    #[test]
    fn test_resources_policy() {
        let policy = UploadCategory::Resources.policy();
        for ty in DOCUMENT_TYPES {
            assert!(policy.admits(ty), "{ty}");
        }
        assert!(policy.admits("image/webp"));
        assert!(policy.admits("Application/PDF"));
        assert!(policy.admits("text/plain; charset=utf-8"));
        assert!(!policy.admits("application/zip"));
        assert!(!policy.admits("video/mp4"));
        assert!(!policy.admits("image/"));
    }
}
