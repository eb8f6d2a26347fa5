//! News entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::NewsCategory;

/// Default byline for articles published without an explicit author.
pub const DEFAULT_AUTHOR: &str = "SSA";

/// A news article. Unpublishing hides it from the public listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: String,
    pub author: String,
    pub category: NewsCategory,
    pub is_published: bool,
    pub publish_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl News {
    /// Build a fresh record from a draft.
    pub fn from_draft(draft: NewNews) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            image: draft.image,
            author: draft.author,
            category: draft.category,
            is_published: draft.is_published,
            publish_date: draft.publish_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: NewsPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.summary {
            self.summary = v;
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.image {
            self.image = v;
        }
        if let Some(v) = patch.author {
            self.author = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.is_published {
            self.is_published = v;
        }
        if let Some(v) = patch.publish_date {
            self.publish_date = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Field set for a new article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: String,
    pub author: String,
    pub category: NewsCategory,
    pub is_published: bool,
    /// Defaults to the creation time.
    pub publish_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub category: Option<NewsCategory>,
    pub is_published: Option<bool>,
    pub publish_date: Option<DateTime<Utc>>,
}

/// Public listing filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsFilter {
    pub category: Option<NewsCategory>,
    pub limit: u32,
}

impl Default for NewsFilter {
    fn default() -> Self {
        Self {
            category: None,
            limit: 10,
        }
    }
}
