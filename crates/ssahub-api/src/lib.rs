//! # ssahub-api
//!
//! HTTP API layer for SSA Hub built on Axum.
//!
//! Provides the REST endpoints, middleware (rate limiting, CORS, request
//! logging), extractors (bearer auth, multipart forms), DTOs, and the
//! mapping from [`ssahub_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
