//! Resource handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_entity::resource::{Resource, Semester};
use ssahub_service::resource::{CreateResource, UpdateResource};

use crate::dto::request::ResourceQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

/// Form field that carries the uploaded document.
const FILE_FIELD: &str = "file";

fn create_input(form: &MultipartForm) -> Result<CreateResource, AppError> {
    Ok(CreateResource {
        title: form.require("title")?,
        description: form.require("description")?,
        kind: form.parse_required("type")?,
        url: form.text("url"),
        department: form.require("department")?,
        subject: form.require("subject")?,
        year: form.require("year")?,
        semester: form.parse::<Semester>("semester")?.unwrap_or_default(),
    })
}

fn update_input(form: &MultipartForm) -> Result<UpdateResource, AppError> {
    Ok(UpdateResource {
        title: form.text("title"),
        description: form.text("description"),
        kind: form.parse("type")?,
        url: form.text("url"),
        department: form.text("department"),
        subject: form.text("subject"),
        year: form.text("year"),
        semester: form.parse("semester")?,
    })
}

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Resource>>>, AppError> {
    let resources = state.resource_service.list(&query.into_filter()?).await?;
    Ok(Json(ApiResponse::list(resources)))
}

/// GET /api/resources/{id}, counted as a download
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resource_service.download(id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// GET /api/resources/admin/{id}
pub async fn get_resource_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resource_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// POST /api/resources (multipart)
pub async fn create_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<Resource>>), AppError> {
    let input = create_input(&form)?;
    let upload = form.take_file(FILE_FIELD);
    let resource = state.resource_service.create(&auth, input, upload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(resource))))
}

/// PUT /api/resources/{id} (multipart)
pub async fn update_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut form: MultipartForm,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let input = update_input(&form)?;
    let upload = form.take_file(FILE_FIELD);
    let resource = state
        .resource_service
        .update(&auth, id, input, upload)
        .await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// DELETE /api/resources/{id}: soft delete
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resource_service.deactivate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssahub_core::ErrorKind;
    use ssahub_entity::resource::ResourceKind;
    use std::collections::HashMap;

    fn form(pairs: &[(&str, &str)]) -> MultipartForm {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MultipartForm::from_parts(fields, Vec::new())
    }

    #[test]
    fn test_create_requires_core_fields() {
        let err = create_input(&form(&[("title", "Notes"), ("type", "pdf")])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredField);
        assert_eq!(err.message, "Field 'description' is required");
    }

    #[test]
    fn test_create_defaults_semester() {
        let input = create_input(&form(&[
            ("title", "Notes"),
            ("description", "Week 1"),
            ("type", "link"),
            ("url", "https://x/y"),
            ("department", "Physics"),
            ("subject", "Optics"),
            ("year", "Year 2"),
        ]))
        .unwrap();
        assert_eq!(input.kind, ResourceKind::Link);
        assert_eq!(input.semester, Semester::Both);
    }

    #[test]
    fn test_unknown_type_is_validation_error() {
        let err = update_input(&form(&[("type", "podcast")])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
