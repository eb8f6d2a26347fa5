//! Resource CRUD with blob staging around every record write.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_database::ResourceStore;
use ssahub_entity::resource::{
    NewResource, Resource, ResourceFilter, ResourceKind, ResourcePatch, Semester,
};
use ssahub_storage::{BlobLocator, BlobStore, UploadCategory, UploadedFile};

use super::lifecycle::{IncomingFile, plan_create, plan_update};
use crate::context::RequestContext;
use crate::staging::persist_staged;

/// Decoded fields of a create request. The upload travels separately.
#[derive(Debug, Clone)]
pub struct CreateResource {
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub url: Option<String>,
    pub department: String,
    pub subject: String,
    pub year: String,
    pub semester: Semester,
}

/// Decoded fields of an update request; `None` means unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateResource {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub semester: Option<Semester>,
}

/// Manages resources and the blobs they reference.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn ResourceStore>,
    blobs: Arc<BlobStore>,
}

impl std::fmt::Debug for ResourceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").finish_non_exhaustive()
    }
}

impl ResourceService {
    pub fn new(store: Arc<dyn ResourceStore>, blobs: Arc<BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Active resources matching the filter, newest first.
    pub async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, AppError> {
        self.store.list_active(filter).await
    }

    /// Public fetch: counts a download and returns the updated record.
    pub async fn download(&self, id: Uuid) -> Result<Resource, AppError> {
        self.store
            .record_download(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource not found"))
    }

    /// Admin fetch by id, including inactive records.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Resource, AppError> {
        ctx.require_admin()?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource not found"))
    }

    /// Create a resource, storing `upload` first when the kind takes files.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateResource,
        upload: Option<UploadedFile>,
    ) -> Result<Resource, AppError> {
        ctx.require_admin()?;

        let upload = upload.filter(|_| input.kind.accepts_upload());
        let staged = self
            .blobs
            .stage_optional(UploadCategory::Resources, upload)
            .await?;

        let resource = persist_staged(staged, |locator| async move {
            let locator: Option<BlobLocator> = locator.map(Into::into);
            let plan = plan_create(input.kind, input.url.as_deref(), locator.as_ref())?;
            self.store
                .create(NewResource {
                    title: input.title,
                    description: input.description,
                    kind: input.kind,
                    url: plan.url,
                    file: plan.file,
                    department: input.department,
                    subject: input.subject,
                    year: input.year,
                    semester: input.semester,
                })
                .await
        })
        .await?;

        info!(
            resource_id = %resource.id,
            kind = %resource.kind.as_str(),
            uploaded = resource.has_upload(),
            user = %ctx.username,
            "Resource created"
        );
        Ok(resource)
    }

    /// Apply a partial update. A replaced upload is pruned only after the
    /// record update has been persisted.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateResource,
        upload: Option<UploadedFile>,
    ) -> Result<Resource, AppError> {
        ctx.require_admin()?;

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Resource not found"))?;

        let target = input.kind.unwrap_or(existing.kind);
        let ignored = upload.is_some() && !target.accepts_upload();
        let upload = upload.filter(|_| target.accepts_upload());
        let staged = self
            .blobs
            .stage_optional(UploadCategory::Resources, upload)
            .await?;

        let (resource, prune) = persist_staged(staged, |locator| async move {
            let locator: Option<BlobLocator> = locator.map(Into::into);
            let file = match locator.as_ref() {
                Some(locator) => IncomingFile::Stored(locator),
                None if ignored => IncomingFile::Ignored,
                None => IncomingFile::Absent,
            };
            let plan = plan_update(&existing, input.kind, input.url.as_deref(), file)?;
            let patch = ResourcePatch {
                title: input.title,
                description: input.description,
                kind: input.kind,
                url: plan.url,
                file: plan.file,
                department: input.department,
                subject: input.subject,
                year: input.year,
                semester: input.semester,
            };
            let updated = self.store.update(id, patch).await?;
            Ok((updated, plan.prune))
        })
        .await?;

        if let Some(old) = prune {
            self.blobs.delete_str(&old).await;
        }

        info!(resource_id = %id, user = %ctx.username, "Resource updated");
        Ok(resource)
    }

    /// Soft delete. The uploaded blob is kept.
    pub async fn deactivate(&self, ctx: &RequestContext, id: Uuid) -> Result<Resource, AppError> {
        ctx.require_admin()?;
        let resource = self.store.deactivate(id).await?;
        info!(resource_id = %id, user = %ctx.username, "Resource deactivated");
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ssahub_core::ErrorKind;
    use ssahub_core::result::AppResult;
    use ssahub_core::traits::{RecordStore, SoftDelete};

    use crate::testing::{Fixture, admin, editor, pdf_upload, png_upload};

    fn link_input(url: Option<&str>) -> CreateResource {
        CreateResource {
            title: "Course portal".into(),
            description: "Official syllabus".into(),
            kind: ResourceKind::Link,
            url: url.map(str::to_string),
            department: "Computer Science".into(),
            subject: "Algorithms".into(),
            year: "Year 2".into(),
            semester: Semester::Second,
        }
    }

    fn pdf_input() -> CreateResource {
        CreateResource {
            kind: ResourceKind::Pdf,
            url: None,
            ..link_input(None)
        }
    }

    /// Reads and deactivates normally; every write fails.
    struct WriteFailing(Arc<dyn ResourceStore>);

    #[async_trait]
    impl RecordStore<Resource, NewResource, ResourcePatch> for WriteFailing {
        async fn create(&self, _draft: NewResource) -> AppResult<Resource> {
            Err(AppError::database("connection reset"))
        }
        async fn update(&self, _id: Uuid, _patch: ResourcePatch) -> AppResult<Resource> {
            Err(AppError::database("connection reset"))
        }
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
            self.0.find_by_id(id).await
        }
    }

    #[async_trait]
    impl SoftDelete<Resource> for WriteFailing {
        async fn deactivate(&self, id: Uuid) -> AppResult<Resource> {
            self.0.deactivate(id).await
        }
    }

    #[async_trait]
    impl ResourceStore for WriteFailing {
        async fn list_active(&self, filter: &ResourceFilter) -> AppResult<Vec<Resource>> {
            self.0.list_active(filter).await
        }
        async fn record_download(&self, id: Uuid) -> AppResult<Option<Resource>> {
            self.0.record_download(id).await
        }
    }

    #[tokio::test]
    async fn test_create_link_without_url_stores_nothing() {
        let fx = Fixture::new().await;
        let svc = fx.resources();

        let err = svc
            .create(&admin(), link_input(None), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);

        let ok = svc
            .create(&admin(), link_input(Some("https://x/y")), None)
            .await
            .unwrap();
        assert_eq!(ok.url, "https://x/y");
        assert_eq!(ok.file, "");
    }

    #[tokio::test]
    async fn test_create_pdf_with_upload_mirrors_locator() {
        let fx = Fixture::new().await;
        let r = fx
            .resources()
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap();
        assert!(r.file.starts_with("/uploads/resources/file-"));
        assert_eq!(r.url, r.file);
        assert!(fx.blobs.contains(&BlobLocator::from(r.file.as_str())).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_pdf_without_url_or_upload_leaves_no_blob() {
        let fx = Fixture::new().await;
        let err = fx
            .resources()
            .create(&admin(), pdf_input(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
        assert_eq!(fx.blob_count("resources"), 0);
    }

    #[tokio::test]
    async fn test_link_upload_is_never_stored() {
        let fx = Fixture::new().await;
        let r = fx
            .resources()
            .create(&admin(), link_input(Some("https://x/y")), Some(pdf_upload()))
            .await
            .unwrap();
        assert_eq!(r.file, "");
        assert_eq!(fx.blob_count("resources"), 0);
    }

    #[tokio::test]
    async fn test_failed_create_releases_staged_blob() {
        let fx = Fixture::new().await;
        let svc = ResourceService::new(
            Arc::new(WriteFailing(fx.stores.resources.clone())),
            fx.blobs.clone(),
        );

        let err = svc
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(fx.blob_count("resources"), 0);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_old_blob_and_releases_new() {
        let fx = Fixture::new().await;
        let created = fx
            .resources()
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap();

        let svc = ResourceService::new(
            Arc::new(WriteFailing(fx.stores.resources.clone())),
            fx.blobs.clone(),
        );

        let err = svc
            .update(&admin(), created.id, UpdateResource::default(), Some(pdf_upload()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(fx.blob_count("resources"), 1);
        assert!(fx.blobs.contains(&BlobLocator::from(created.file.as_str())).await.unwrap());
    }

    #[tokio::test]
    async fn test_replacing_upload_prunes_old_blob_once() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let first = svc
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap();

        let second = svc
            .update(&admin(), first.id, UpdateResource::default(), Some(pdf_upload()))
            .await
            .unwrap();
        assert_ne!(second.file, first.file);
        assert_eq!(second.url, second.file);
        assert!(!fx.blobs.contains(&BlobLocator::from(first.file.as_str())).await.unwrap());
        assert_eq!(fx.blob_count("resources"), 1);
    }

    #[tokio::test]
    async fn test_switch_to_link_needs_url_and_prunes_file() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let created = svc
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap();

        let to_link = UpdateResource {
            kind: Some(ResourceKind::Link),
            ..Default::default()
        };
        let err = svc
            .update(&admin(), created.id, to_link.clone(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
        assert_eq!(fx.blob_count("resources"), 1);

        let updated = svc
            .update(
                &admin(),
                created.id,
                UpdateResource {
                    url: Some("https://x/y".into()),
                    ..to_link
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.kind, ResourceKind::Link);
        assert_eq!(updated.file, "");
        assert_eq!(fx.blob_count("resources"), 0);
    }

    #[tokio::test]
    async fn test_link_update_declaring_kind_needs_url() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let link = svc
            .create(&admin(), link_input(Some("https://x/y")), None)
            .await
            .unwrap();

        let err = svc
            .update(
                &admin(),
                link.id,
                UpdateResource {
                    kind: Some(ResourceKind::Link),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);

        let renamed = svc
            .update(
                &admin(),
                link.id,
                UpdateResource {
                    title: Some("Renamed portal".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(renamed.url, "https://x/y");
        assert_eq!(renamed.title, "Renamed portal");
    }

    #[tokio::test]
    async fn test_file_sent_to_link_without_url_is_rejected() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let link = svc
            .create(&admin(), link_input(Some("https://x/y")), None)
            .await
            .unwrap();

        let err = svc
            .update(&admin(), link.id, UpdateResource::default(), Some(pdf_upload()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
        assert_eq!(fx.blob_count("resources"), 0);

        let unchanged = svc.get(&admin(), link.id).await.unwrap();
        assert_eq!(unchanged.url, "https://x/y");
        assert_eq!(unchanged.file, "");
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found_and_stores_nothing() {
        let fx = Fixture::new().await;
        let err = fx
            .resources()
            .update(&admin(), Uuid::now_v7(), UpdateResource::default(), Some(pdf_upload()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(fx.blob_count("resources"), 0);
    }

    #[tokio::test]
    async fn test_rejected_media_type_on_resource() {
        let fx = Fixture::new().await;
        let mut exe = pdf_upload();
        exe.content_type = "application/x-msdownload".into();
        let err = fx
            .resources()
            .create(&admin(), pdf_input(), Some(exe))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedMediaType);

        // Images are fine for resources.
        fx.resources()
            .create(&admin(), pdf_input(), Some(png_upload("file")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_deactivate_keeps_blob_and_hides_from_listing() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let created = svc
            .create(&admin(), pdf_input(), Some(pdf_upload()))
            .await
            .unwrap();

        let gone = svc.deactivate(&admin(), created.id).await.unwrap();
        assert!(!gone.is_active);
        assert!(fx.blobs.contains(&BlobLocator::from(created.file.as_str())).await.unwrap());
        assert!(svc.list(&ResourceFilter::default()).await.unwrap().is_empty());
        assert_eq!(
            svc.download(created.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );

        let direct = svc.get(&admin(), created.id).await.unwrap();
        assert!(!direct.is_active);
    }

    #[tokio::test]
    async fn test_download_counts() {
        let fx = Fixture::new().await;
        let svc = fx.resources();
        let created = svc
            .create(&admin(), link_input(Some("https://x/y")), None)
            .await
            .unwrap();
        svc.download(created.id).await.unwrap();
        let r = svc.download(created.id).await.unwrap();
        assert_eq!(r.download_count, 2);
    }

    #[tokio::test]
    async fn test_editor_cannot_mutate() {
        let fx = Fixture::new().await;
        let err = fx
            .resources()
            .create(&editor(), link_input(Some("https://x/y")), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
