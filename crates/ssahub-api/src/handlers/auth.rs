//! Auth handlers: login and me.

use axum::Json;
use axum::extract::State;

use ssahub_core::error::AppError;
use ssahub_entity::user::User;
use ssahub_service::user::LoginOutcome;

use crate::dto::request::{LoginRequest, validate};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginOutcome>>, AppError> {
    validate(&req)?;
    let outcome = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    Ok(Json(ApiResponse::ok(state.auth_service.me(&auth).await?)))
}
