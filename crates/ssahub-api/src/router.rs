//! Route definitions for the SSA Hub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! Uploaded files are served from the public prefix when blobs live on
//! local disk.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use ssahub_core::config::storage::StorageBackend;

use crate::handlers;
use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// Build the router with every route and the per-client rate limit.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(resource_routes())
        .merge(leader_routes())
        .merge(news_routes())
        .merge(blog_routes())
        .merge(contact_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn_with_state(state.clone(), rate_limit));

    let mut router = Router::new().nest("/api", api_routes);

    let storage = &state.config.storage;
    if storage.backend == StorageBackend::Local {
        router = router.nest_service(
            &storage.local.public_prefix,
            ServeDir::new(&storage.local.root_path),
        );
    }

    router.with_state(state)
}

/// Login and current-user lookup
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Academic resources and their upload lifecycle
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            get(handlers::resource::list_resources).post(handlers::resource::create_resource),
        )
        .route(
            "/resources/{id}",
            get(handlers::resource::get_resource)
                .put(handlers::resource::update_resource)
                .delete(handlers::resource::delete_resource),
        )
        .route(
            "/resources/admin/{id}",
            get(handlers::resource::get_resource_admin),
        )
}

fn leader_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/leaders",
            get(handlers::leader::list_leaders).post(handlers::leader::create_leader),
        )
        .route(
            "/leaders/{id}",
            get(handlers::leader::get_leader)
                .put(handlers::leader::update_leader)
                .delete(handlers::leader::delete_leader),
        )
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/news",
            get(handlers::news::list_news).post(handlers::news::create_news),
        )
        .route(
            "/news/{id}",
            get(handlers::news::get_news)
                .put(handlers::news::update_news)
                .delete(handlers::news::delete_news),
        )
}

/// Blog posts, featured listings and likes
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route("/blogs/featured/popular", get(handlers::blog::popular_blogs))
        .route("/blogs/featured/recent", get(handlers::blog::recent_blogs))
        .route(
            "/blogs/{id}",
            get(handlers::blog::get_blog)
                .put(handlers::blog::update_blog)
                .delete(handlers::blog::delete_blog),
        )
        .route("/blogs/{id}/like", post(handlers::blog::like_blog))
}

/// Public submission plus the admin inbox
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contact",
            post(handlers::contact::submit_message).get(handlers::contact::list_messages),
        )
        .route(
            "/contact/{id}",
            get(handlers::contact::get_message).delete(handlers::contact::delete_message),
        )
        .route("/contact/{id}/read", put(handlers::contact::mark_read))
        .route("/contact/{id}/respond", put(handlers::contact::respond))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
