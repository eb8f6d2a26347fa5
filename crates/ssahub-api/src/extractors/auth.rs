//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, validates it, and injects the request context.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use ssahub_core::error::AppError;
use ssahub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn bearer(parts: &Parts) -> Option<Result<&str, AppError>> {
    let header = parts.headers.get(AUTHORIZATION)?;
    Some(
        header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format")),
    )
}

fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = state.jwt_decoder.decode(token)?;
    Ok(AuthUser(RequestContext::new(
        claims.user_id(),
        claims.role,
        claims.username,
    )))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts)
            .unwrap_or_else(|| Err(AppError::authentication("No token, authorization denied")))?;
        authenticate(token, state)
    }
}

/// `Option<AuthUser>`: anonymous when no header is sent, but a malformed or
/// expired token is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match bearer(parts) {
            None => Ok(None),
            Some(token) => authenticate(token?, state).map(Some),
        }
    }
}
