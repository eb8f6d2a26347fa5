//! How a resource's `url`/`file` pair is derived on create and update.
//!
//! These functions are pure: they look at the declared kind, the url the
//! caller supplied, and the locator of an upload that has already been
//! staged, and either return the fields to persist or a caller error.
//! The service staging and releasing blobs around them lives in
//! [`super::service`].

use ssahub_core::error::AppError;
use ssahub_entity::resource::{Resource, ResourceKind};
use ssahub_storage::BlobLocator;

/// Fields for a new resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub url: String,
    pub file: String,
}

/// Changes to an existing resource's locator fields.
///
/// `None` leaves the stored value alone. `prune` names the previously
/// uploaded blob that is no longer referenced once the update commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    pub url: Option<String>,
    pub file: Option<String>,
    pub prune: Option<String>,
}

fn supplied(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|u| !u.is_empty())
}

/// Decide `url`/`file` for a new resource.
///
/// Link and video resources never carry an upload; callers do not stage one
/// for them, and `upload` is ignored if passed anyway.
pub fn plan_create(
    kind: ResourceKind,
    url: Option<&str>,
    upload: Option<&BlobLocator>,
) -> Result<CreatePlan, AppError> {
    let plan = match (kind.accepts_upload(), upload, supplied(url)) {
        (true, Some(locator), _) => CreatePlan {
            url: locator.as_str().to_string(),
            file: locator.as_str().to_string(),
        },
        (_, _, Some(url)) => CreatePlan {
            url: url.to_string(),
            file: String::new(),
        },
        (_, _, None) => return Err(AppError::missing_field("url")),
    };

    if plan.url.is_empty() {
        return Err(AppError::missing_field("url"));
    }
    Ok(plan)
}

/// What arrived in the file slot of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingFile<'a> {
    Absent,
    /// A file was sent for a kind that takes none, so it was never stored.
    Ignored,
    /// A file was sent and staged under this locator.
    Stored(&'a BlobLocator),
}

/// Decide how an update changes `url`/`file`.
///
/// `kind` is the kind declared by the update, if any. Declaring a link or
/// video kind demands a url, as does sending a file to one. Only an update
/// that names neither a kind nor a file keeps an existing link as it is. A
/// new upload always wins over a supplied url for file-backed kinds.
pub fn plan_update(
    existing: &Resource,
    kind: Option<ResourceKind>,
    url: Option<&str>,
    file: IncomingFile<'_>,
) -> Result<UpdatePlan, AppError> {
    let target = kind.unwrap_or(existing.kind);
    let url = supplied(url);
    let old_file = (!existing.file.is_empty()).then(|| existing.file.clone());

    if target.is_external() {
        return match (url, kind, file) {
            (Some(url), _, _) => Ok(UpdatePlan {
                url: Some(url.to_string()),
                file: old_file.is_some().then(String::new),
                prune: old_file,
            }),
            (None, None, IncomingFile::Absent) if !existing.url.is_empty() => {
                Ok(UpdatePlan::default())
            }
            (None, None, IncomingFile::Absent) => Err(corrupt(existing)),
            (None, _, _) => Err(AppError::missing_field("url")),
        };
    }

    if let IncomingFile::Stored(locator) = file {
        let locator = locator.as_str().to_string();
        return Ok(UpdatePlan {
            url: Some(locator.clone()),
            file: Some(locator.clone()),
            prune: old_file.filter(|old| *old != locator),
        });
    }

    if let Some(url) = url {
        if old_file.as_deref() == Some(url) {
            return Ok(UpdatePlan {
                url: Some(url.to_string()),
                ..Default::default()
            });
        }
        return Ok(UpdatePlan {
            url: Some(url.to_string()),
            file: old_file.is_some().then(String::new),
            prune: old_file,
        });
    }

    if existing.url.is_empty() {
        return Err(corrupt(existing));
    }
    Ok(UpdatePlan::default())
}

fn corrupt(existing: &Resource) -> AppError {
    AppError::invariant(format!("Resource {} has no url", existing.id))
}
