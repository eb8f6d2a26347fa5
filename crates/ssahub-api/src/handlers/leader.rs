//! Leader handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::ValidateEmail;

use ssahub_core::error::AppError;
use ssahub_entity::leader::{Leader, LeaderPatch, NewLeader};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

fn checked_email(form: &MultipartForm) -> Result<Option<String>, AppError> {
    match form.text("email") {
        Some(email) if !email.validate_email() => {
            Err(AppError::validation("Email must be valid if provided"))
        }
        other => Ok(other),
    }
}

fn new_leader(form: &MultipartForm) -> Result<NewLeader, AppError> {
    Ok(NewLeader {
        name: form.require("name")?,
        position: form.require("position")?,
        bio: form.require("bio")?,
        department: form.text("department").unwrap_or_default(),
        year: form.text("year").unwrap_or_default(),
        email: checked_email(form)?.unwrap_or_default(),
        phone: form.text("phone").unwrap_or_default(),
        display_order: form.parse("order")?.unwrap_or(0),
        image: String::new(),
    })
}

fn leader_patch(form: &MultipartForm) -> Result<LeaderPatch, AppError> {
    Ok(LeaderPatch {
        name: form.text("name"),
        position: form.text("position"),
        bio: form.text("bio"),
        department: form.text("department"),
        year: form.text("year"),
        email: checked_email(form)?,
        phone: form.text("phone"),
        display_order: form.parse("order")?,
        is_active: form.flag("isActive")?,
        image: None,
    })
}

/// GET /api/leaders
pub async fn list_leaders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Leader>>>, AppError> {
    Ok(Json(ApiResponse::list(state.leader_service.list().await?)))
}

/// GET /api/leaders/{id}
pub async fn get_leader(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Leader>>, AppError> {
    Ok(Json(ApiResponse::ok(state.leader_service.get(id).await?)))
}

/// POST /api/leaders (multipart)
pub async fn create_leader(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<Leader>>), AppError> {
    let draft = new_leader(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let leader = state.leader_service.create(&auth, draft, image).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(leader))))
}

/// PUT /api/leaders/{id} (multipart)
pub async fn update_leader(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut form: MultipartForm,
) -> Result<Json<ApiResponse<Leader>>, AppError> {
    let patch = leader_patch(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let leader = state.leader_service.update(&auth, id, patch, image).await?;
    Ok(Json(ApiResponse::ok(leader)))
}

/// DELETE /api/leaders/{id}
pub async fn delete_leader(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.leader_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Leader deleted"))))
}
