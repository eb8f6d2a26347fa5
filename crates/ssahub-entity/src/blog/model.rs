//! Blog entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::BlogCategory;

/// A blog post with engagement counters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub image: String,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    /// Estimated reading time in minutes.
    pub reading_time: i32,
    pub is_published: bool,
    pub publish_date: DateTime<Utc>,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Build a fresh record from a draft.
    pub fn from_draft(draft: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: draft.title,
            content: draft.content,
            summary: draft.summary,
            author: draft.author,
            image: draft.image,
            category: draft.category,
            tags: draft.tags,
            reading_time: draft.reading_time,
            is_published: draft.is_published,
            publish_date: now,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: BlogPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.summary {
            self.summary = v;
        }
        if let Some(v) = patch.author {
            self.author = v;
        }
        if let Some(v) = patch.image {
            self.image = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
        if let Some(v) = patch.reading_time {
            self.reading_time = v;
        }
        if let Some(v) = patch.is_published {
            self.is_published = v;
        }
        self.updated_at = Utc::now();
    }

    /// Check the post against a listing filter.
    pub fn matches(&self, filter: &BlogFilter) -> bool {
        let visible = match filter.visibility {
            Visibility::Published => self.is_published,
            Visibility::Unpublished => !self.is_published,
            Visibility::All => true,
        };
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        visible
            && filter.category.is_none_or(|c| c == self.category)
            && filter
                .tag
                .as_deref()
                .is_none_or(|t| self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(t)))
            && search.as_deref().is_none_or(|s| {
                self.title.to_lowercase().contains(s)
                    || self.content.to_lowercase().contains(s)
                    || self.summary.to_lowercase().contains(s)
            })
    }
}

/// Split comma-separated tag text, trimming and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Field set for a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author: String,
    pub image: String,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    pub reading_time: i32,
    pub is_published: bool,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub category: Option<BlogCategory>,
    pub tags: Option<Vec<String>>,
    pub reading_time: Option<i32>,
    pub is_published: Option<bool>,
}

/// Which publication states a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Published,
    Unpublished,
    All,
}

/// Listing filter for blog posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogFilter {
    pub visibility: Visibility,
    pub category: Option<BlogCategory>,
    pub tag: Option<String>,
    /// Case-insensitive substring over title, content, and summary.
    pub search: Option<String>,
}
