//! Resource entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{ResourceKind, Semester};

/// A downloadable or linkable study resource.
///
/// `url` is never empty once persisted. When the content was uploaded,
/// `file` holds the blob locator and `url` mirrors it; otherwise `file`
/// is the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    pub file: String,
    pub department: String,
    pub subject: String,
    pub year: String,
    pub semester: Semester,
    /// Incremented on every individual public read.
    pub download_count: i64,
    /// `false` once soft-deleted.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Build a fresh record from a draft (used by stores that generate ids in process).
    pub fn from_draft(draft: NewResource) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: draft.title,
            description: draft.description,
            kind: draft.kind,
            url: draft.url,
            file: draft.file,
            department: draft.department,
            subject: draft.subject,
            year: draft.year,
            semester: draft.semester,
            download_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the content behind `url` was uploaded through this service.
    pub fn has_upload(&self) -> bool {
        !self.file.is_empty()
    }

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: ResourcePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(file) = patch.file {
            self.file = file;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(semester) = patch.semester {
            self.semester = semester;
        }
        self.updated_at = Utc::now();
    }

    /// Check the record against a listing filter (exact, case-sensitive match).
    pub fn matches(&self, filter: &ResourceFilter) -> bool {
        filter.department.as_deref().is_none_or(|d| d == self.department)
            && filter.year.as_deref().is_none_or(|y| y == self.year)
            && filter.subject.as_deref().is_none_or(|s| s == self.subject)
            && filter.kind.is_none_or(|k| k == self.kind)
    }
}

/// Field set for a new resource, after the url/file pair has been resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub url: String,
    pub file: String,
    pub department: String,
    pub subject: String,
    pub year: String,
    pub semester: Semester,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub file: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub semester: Option<Semester>,
}

/// Listing filter for active resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceFilter {
    pub department: Option<String>,
    pub year: Option<String>,
    pub subject: Option<String>,
    pub kind: Option<ResourceKind>,
}
