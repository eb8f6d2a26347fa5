//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use ssahub_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use ssahub_core::config::AppConfig;
use ssahub_database::Stores;
use ssahub_service::{
    AuthService, BlogService, ContactService, LeaderService, NewsService, ResourceService,
};
use ssahub_storage::BlobStore;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record stores (PostgreSQL or in-memory)
    pub stores: Stores,
    /// Blob store for uploads
    pub blobs: Arc<BlobStore>,
    /// Per-client request budget
    pub rate_limiter: RateLimiter,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub resource_service: ResourceService,
    pub leader_service: LeaderService,
    pub news_service: NewsService,
    pub blog_service: BlogService,
    pub contact_service: ContactService,
    pub auth_service: AuthService,
}

impl AppState {
    /// Wire every service on top of the given stores and blob store.
    pub fn new(config: AppConfig, stores: Stores, blobs: Arc<BlobStore>) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rate_limiter = RateLimiter::from_config(&config.server.rate_limit);

        Self {
            resource_service: ResourceService::new(stores.resources.clone(), blobs.clone()),
            leader_service: LeaderService::new(stores.leaders.clone(), blobs.clone()),
            news_service: NewsService::new(stores.news.clone(), blobs.clone()),
            blog_service: BlogService::new(stores.blogs.clone(), blobs.clone()),
            contact_service: ContactService::new(stores.contacts.clone()),
            auth_service: AuthService::new(stores.users.clone(), hasher, encoder),
            jwt_decoder,
            rate_limiter,
            config: Arc::new(config),
            stores,
            blobs,
        }
    }
}
