//! Contact form inbox.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_database::ContactStore;
use ssahub_entity::contact::{ContactFilter, ContactMessage, ContactPatch, NewContactMessage};

use crate::context::RequestContext;

/// Accepts public messages and lets admins triage them.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService").finish_non_exhaustive()
    }
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Public submission. Field rules are enforced by the request DTO.
    pub async fn submit(&self, draft: NewContactMessage) -> Result<ContactMessage, AppError> {
        let message = self.store.create(draft).await?;
        info!(message_id = %message.id, "Contact message received");
        Ok(message)
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ContactFilter,
    ) -> Result<Vec<ContactMessage>, AppError> {
        ctx.require_admin()?;
        self.store.list(filter).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<ContactMessage, AppError> {
        ctx.require_admin()?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))
    }

    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ContactMessage, AppError> {
        ctx.require_admin()?;
        self.store
            .update(
                id,
                ContactPatch {
                    is_read: Some(true),
                    ..Default::default()
                },
            )
            .await
    }

    /// Record the admin's reply; the message counts as read afterwards.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        response: &str,
    ) -> Result<ContactMessage, AppError> {
        ctx.require_admin()?;
        let response = response.trim();
        if response.is_empty() {
            return Err(AppError::missing_field("response"));
        }

        let message = self
            .store
            .update(
                id,
                ContactPatch {
                    is_read: Some(true),
                    response: Some(response.to_string()),
                    responded_at: Some(Utc::now()),
                    responded_by: Some(ctx.username.clone()),
                },
            )
            .await?;
        info!(message_id = %id, user = %ctx.username, "Contact message answered");
        Ok(message)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Message not found"));
        }
        info!(message_id = %id, user = %ctx.username, "Contact message deleted");
        Ok(())
    }
}
