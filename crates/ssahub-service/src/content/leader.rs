//! Association leadership roster.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_database::LeaderStore;
use ssahub_entity::leader::{Leader, LeaderPatch, NewLeader};
use ssahub_storage::{BlobStore, UploadCategory, UploadedFile};

use super::prune_replaced;
use crate::context::RequestContext;
use crate::staging::persist_staged;

/// Manages leader profiles and their portraits.
#[derive(Clone)]
pub struct LeaderService {
    store: Arc<dyn LeaderStore>,
    blobs: Arc<BlobStore>,
}

impl std::fmt::Debug for LeaderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderService").finish_non_exhaustive()
    }
}

impl LeaderService {
    pub fn new(store: Arc<dyn LeaderStore>, blobs: Arc<BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub async fn list(&self) -> Result<Vec<Leader>, AppError> {
        self.store.list_active().await
    }

    /// Fetch an active leader.
    pub async fn get(&self, id: Uuid) -> Result<Leader, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|l| l.is_active)
            .ok_or_else(|| AppError::not_found("Leader not found"))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut draft: NewLeader,
        image: Option<UploadedFile>,
    ) -> Result<Leader, AppError> {
        ctx.require_admin()?;
        let staged = self.blobs.stage_optional(UploadCategory::Leaders, image).await?;

        let leader = persist_staged(staged, |locator| async move {
            if let Some(locator) = locator {
                draft.image = locator;
            }
            self.store.create(draft).await
        })
        .await?;

        info!(leader_id = %leader.id, name = %leader.name, "Leader created");
        Ok(leader)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut patch: LeaderPatch,
        image: Option<UploadedFile>,
    ) -> Result<Leader, AppError> {
        ctx.require_admin()?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Leader not found"))?;

        let staged = self.blobs.stage_optional(UploadCategory::Leaders, image).await?;
        let leader = persist_staged(staged, |locator| async move {
            if locator.is_some() {
                patch.image = locator;
            }
            self.store.update(id, patch).await
        })
        .await?;

        prune_replaced(&self.blobs, &existing.image, &leader.image).await;
        info!(leader_id = %id, "Leader updated");
        Ok(leader)
    }

    /// Deactivate the leader and delete their portrait.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let leader = self.store.deactivate(id).await?;
        self.blobs.delete_str(&leader.image).await;
        info!(leader_id = %id, user = %ctx.username, "Leader deactivated");
        Ok(())
    }
}
