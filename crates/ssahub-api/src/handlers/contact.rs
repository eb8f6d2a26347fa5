//! Contact form handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_entity::contact::{ContactFilter, ContactMessage};

use crate::dto::request::{ContactQuery, ContactRequest, RespondRequest, validate};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/contact
pub async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), AppError> {
    validate(&req)?;
    state.contact_service.submit(req.into_draft()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MessageResponse::new(
            "Message sent successfully",
        ))),
    ))
}

/// GET /api/contact?isRead=
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ContactQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessage>>>, AppError> {
    let filter = ContactFilter {
        is_read: query.is_read,
    };
    let messages = state.contact_service.list(&auth, &filter).await?;
    Ok(Json(ApiResponse::list(messages)))
}

/// GET /api/contact/{id}
pub async fn get_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.contact_service.get(&auth, id).await?,
    )))
}

/// PUT /api/contact/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    Ok(Json(ApiResponse::ok(
        state.contact_service.mark_read(&auth, id).await?,
    )))
}

/// PUT /api/contact/{id}/respond
pub async fn respond(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    let message = state
        .contact_service
        .respond(&auth, id, &req.response)
        .await?;
    Ok(Json(ApiResponse::ok(message)))
}

/// DELETE /api/contact/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.contact_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Message deleted"))))
}
