//! Contact message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message left by a visitor, optionally answered by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    /// Username of the administrator who answered.
    pub responded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Build a fresh, unread message from a draft.
    pub fn from_draft(draft: NewContactMessage) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            is_read: false,
            response: None,
            responded_at: None,
            responded_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every field that the patch sets.
    pub fn apply(&mut self, patch: ContactPatch) {
        if let Some(v) = patch.is_read {
            self.is_read = v;
        }
        if let Some(v) = patch.response {
            self.response = Some(v);
        }
        if let Some(v) = patch.responded_at {
            self.responded_at = Some(v);
        }
        if let Some(v) = patch.responded_by {
            self.responded_by = Some(v);
        }
        self.updated_at = Utc::now();
    }
}

/// Field set for a new message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPatch {
    pub is_read: Option<bool>,
    pub response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<String>,
}

/// Admin listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactFilter {
    pub is_read: Option<bool>,
}
