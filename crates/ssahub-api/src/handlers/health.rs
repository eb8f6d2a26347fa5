//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database_ok = state.stores.health_check().await.unwrap_or(false);
    let storage_ok = state.blobs.health_check().await.unwrap_or(false);
    let healthy = database_ok && storage_ok;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::ok(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: state.stores.backend().to_string(),
            storage: state.blobs.backend().to_string(),
            timestamp: Utc::now(),
        })),
    )
}
