//! Leader entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A member of the association's leadership, shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub department: String,
    pub year: String,
    /// Image locator, or empty when no portrait was uploaded.
    pub image: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    /// Ascending sort key on the public listing.
    #[serde(rename = "order")]
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Leader {
    /// Build a fresh record from a draft.
    pub fn from_draft(draft: NewLeader) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            position: draft.position,
            department: draft.department,
            year: draft.year,
            image: draft.image,
            bio: draft.bio,
            email: draft.email,
            phone: draft.phone,
            display_order: draft.display_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: LeaderPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.position {
            self.position = v;
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = patch.year {
            self.year = v;
        }
        if let Some(v) = patch.image {
            self.image = v;
        }
        if let Some(v) = patch.bio {
            self.bio = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.display_order {
            self.display_order = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Field set for a new leader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLeader {
    pub name: String,
    pub position: String,
    pub department: String,
    pub year: String,
    pub image: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub display_order: i32,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderPatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
