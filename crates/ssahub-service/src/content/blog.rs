//! Member blog posts with view and like counters.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_database::BlogStore;
use ssahub_entity::blog::{Blog, BlogFilter, BlogPatch, NewBlog, Visibility};
use ssahub_storage::{BlobStore, UploadCategory, UploadedFile};

use super::prune_replaced;
use crate::context::RequestContext;
use crate::staging::persist_staged;

/// Upper bound for the featured listings.
pub const MAX_FEATURED: u32 = 50;

/// Manages blog posts and their cover images.
#[derive(Clone)]
pub struct BlogService {
    store: Arc<dyn BlogStore>,
    blobs: Arc<BlobStore>,
}

impl std::fmt::Debug for BlogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogService").finish_non_exhaustive()
    }
}

fn is_admin(viewer: Option<&RequestContext>) -> bool {
    viewer.is_some_and(RequestContext::is_admin)
}

impl BlogService {
    pub fn new(store: Arc<dyn BlogStore>, blobs: Arc<BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Posts matching the filter. Only admins may see unpublished posts.
    pub async fn list(
        &self,
        viewer: Option<&RequestContext>,
        mut filter: BlogFilter,
    ) -> Result<Vec<Blog>, AppError> {
        if !is_admin(viewer) {
            filter.visibility = Visibility::Published;
        }
        self.store.list(&filter).await
    }

    /// Fetch a post and count the view.
    pub async fn view(&self, viewer: Option<&RequestContext>, id: Uuid) -> Result<Blog, AppError> {
        self.store
            .record_view(id, is_admin(viewer))
            .await?
            .ok_or_else(|| AppError::not_found("Blog post not found"))
    }

    pub async fn like(&self, id: Uuid) -> Result<Blog, AppError> {
        self.store
            .like(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog post not found"))
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<Blog>, AppError> {
        self.store.popular(limit.clamp(1, MAX_FEATURED)).await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<Blog>, AppError> {
        self.store.recent(limit.clamp(1, MAX_FEATURED)).await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut draft: NewBlog,
        image: Option<UploadedFile>,
    ) -> Result<Blog, AppError> {
        ctx.require_admin()?;
        let staged = self.blobs.stage_optional(UploadCategory::Blogs, image).await?;

        let blog = persist_staged(staged, |locator| async move {
            if let Some(locator) = locator {
                draft.image = locator;
            }
            self.store.create(draft).await
        })
        .await?;

        info!(blog_id = %blog.id, author = %blog.author, "Blog post created");
        Ok(blog)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut patch: BlogPatch,
        image: Option<UploadedFile>,
    ) -> Result<Blog, AppError> {
        ctx.require_admin()?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog post not found"))?;

        let staged = self.blobs.stage_optional(UploadCategory::Blogs, image).await?;
        let blog = persist_staged(staged, |locator| async move {
            if locator.is_some() {
                patch.image = locator;
            }
            self.store.update(id, patch).await
        })
        .await?;

        prune_replaced(&self.blobs, &existing.image, &blog.image).await;
        info!(blog_id = %id, "Blog post updated");
        Ok(blog)
    }

    /// Remove the post for good, along with its image.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let blog = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blog post not found"))?;
        self.blobs.delete_str(&blog.image).await;
        info!(blog_id = %id, user = %ctx.username, "Blog post deleted");
        Ok(())
    }
}
