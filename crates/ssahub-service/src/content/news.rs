//! Association news articles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_database::NewsStore;
use ssahub_entity::news::{NewNews, News, NewsFilter, NewsPatch};
use ssahub_storage::{BlobStore, UploadCategory, UploadedFile};

use super::prune_replaced;
use crate::context::RequestContext;
use crate::staging::persist_staged;

/// Upper bound on a single listing.
pub const MAX_LIMIT: u32 = 100;

/// Manages news articles and their cover images.
#[derive(Clone)]
pub struct NewsService {
    store: Arc<dyn NewsStore>,
    blobs: Arc<BlobStore>,
}

impl std::fmt::Debug for NewsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsService").finish_non_exhaustive()
    }
}

impl NewsService {
    pub fn new(store: Arc<dyn NewsStore>, blobs: Arc<BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Published articles, newest first. The limit is clamped to `1..=100`.
    pub async fn list(&self, mut filter: NewsFilter) -> Result<Vec<News>, AppError> {
        filter.limit = filter.limit.clamp(1, MAX_LIMIT);
        self.store.list_published(&filter).await
    }

    /// Fetch a published article.
    pub async fn get(&self, id: Uuid) -> Result<News, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|n| n.is_published)
            .ok_or_else(|| AppError::not_found("News article not found"))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut draft: NewNews,
        image: Option<UploadedFile>,
    ) -> Result<News, AppError> {
        ctx.require_admin()?;
        let staged = self.blobs.stage_optional(UploadCategory::News, image).await?;

        let news = persist_staged(staged, |locator| async move {
            if let Some(locator) = locator {
                draft.image = locator;
            }
            self.store.create(draft).await
        })
        .await?;

        info!(news_id = %news.id, category = ?news.category, "News article created");
        Ok(news)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut patch: NewsPatch,
        image: Option<UploadedFile>,
    ) -> Result<News, AppError> {
        ctx.require_admin()?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("News article not found"))?;

        let staged = self.blobs.stage_optional(UploadCategory::News, image).await?;
        let news = persist_staged(staged, |locator| async move {
            if locator.is_some() {
                patch.image = locator;
            }
            self.store.update(id, patch).await
        })
        .await?;

        prune_replaced(&self.blobs, &existing.image, &news.image).await;
        info!(news_id = %id, "News article updated");
        Ok(news)
    }

    /// Unpublish the article and delete its image.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let news = self.store.deactivate(id).await?;
        self.blobs.delete_str(&news.image).await;
        info!(news_id = %id, user = %ctx.username, "News article unpublished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssahub_core::ErrorKind;
    use ssahub_entity::news::{DEFAULT_AUTHOR, NewsCategory};

    use crate::testing::{Fixture, admin, png_upload};

    fn draft(title: &str, category: NewsCategory) -> NewNews {
        NewNews {
            title: title.into(),
            summary: "Short".into(),
            content: "Long body".into(),
            image: String::new(),
            author: DEFAULT_AUTHOR.into(),
            category,
            is_published: true,
            publish_date: None,
        }
    }

    #[tokio::test]
    async fn test_unpublished_articles_are_hidden() {
        let fx = Fixture::new().await;
        let svc = fx.news();
        let hidden = svc
            .create(
                &admin(),
                NewNews {
                    is_published: false,
                    ..draft("Draft", NewsCategory::General)
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(svc.get(hidden.id).await.unwrap_err().kind, ErrorKind::NotFound);
        assert!(svc.list(NewsFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_category_and_clamps_limit() {
        let fx = Fixture::new().await;
        let svc = fx.news();
        for i in 0..3 {
            svc.create(&admin(), draft(&format!("Win {i}"), NewsCategory::Achievement), None)
                .await
                .unwrap();
        }
        svc.create(&admin(), draft("Gala", NewsCategory::Event), None)
            .await
            .unwrap();

        let wins = svc
            .list(NewsFilter {
                category: Some(NewsCategory::Achievement),
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(wins.len(), 3);

        let one = svc
            .list(NewsFilter {
                category: None,
                limit: 0,
            })
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unpublishes_and_removes_image() {
        let fx = Fixture::new().await;
        let svc = fx.news();
        let news = svc
            .create(&admin(), draft("Gala", NewsCategory::Event), Some(png_upload("image")))
            .await
            .unwrap();
        assert_eq!(fx.blob_count("news"), 1);

        svc.delete(&admin(), news.id).await.unwrap();
        assert_eq!(fx.blob_count("news"), 0);
        assert_eq!(svc.get(news.id).await.unwrap_err().kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_image_replacement() {
        let fx = Fixture::new().await;
        let svc = fx.news();
        let news = svc
            .create(&admin(), draft("Gala", NewsCategory::Event), Some(png_upload("image")))
            .await
            .unwrap();
        let updated = svc
            .update(&admin(), news.id, NewsPatch::default(), Some(png_upload("image")))
            .await
            .unwrap();
        assert_ne!(updated.image, news.image);
        assert_eq!(fx.blob_count("news"), 1);
    }
}
