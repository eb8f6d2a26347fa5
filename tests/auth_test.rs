//! Integration tests for login, token checks and health.

mod helpers;

use std::net::SocketAddr;

use axum::http::StatusCode;
use helpers::{PASSWORD, TestApp};
use serde_json::json;
use ssahub_entity::user::UserRole;

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new().await;
    let token = app.token_for("kwame", UserRole::Editor).await;

    let me = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "kwame");
    assert_eq!(me.body["data"]["role"], "editor");
    assert!(me.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_bad_credentials_share_one_message() {
    let app = TestApp::new().await;
    app.token_for("kwame", UserRole::Editor).await;

    let wrong_password = app
        .json(
            "POST",
            "/api/auth/login",
            json!({ "email": "kwame@ssa.example", "password": "not-it-2026" }),
            None,
        )
        .await;
    let unknown = app
        .json(
            "POST",
            "/api/auth/login",
            json!({ "email": "ghost@ssa.example", "password": PASSWORD }),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_missing_and_garbage_tokens() {
    let app = TestApp::new().await;

    let missing = app.get("/api/auth/me", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "AUTHENTICATION");

    let garbage = app.get("/api/auth/me", Some("not.a.jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_backends() {
    let app = TestApp::new().await;

    let health = app.get("/api/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
    assert_eq!(health.body["data"]["database"], "memory");
    assert_eq!(health.body["data"]["storage"], "local");
}

#[tokio::test]
async fn test_rotating_forwarded_for_does_not_evade_rate_limit() {
    let app = TestApp::with_config(|config| {
        config.server.rate_limit.max_requests = 3;
    })
    .await;
    let peer: SocketAddr = "192.0.2.10:51000".parse().unwrap();

    for i in 0..3 {
        let spoofed = format!("203.0.113.{i}");
        let ok = app
            .get_from("/api/health", peer, &[("X-Forwarded-For", spoofed.as_str())])
            .await;
        assert_eq!(ok.status, StatusCode::OK);
    }

    let limited = app
        .get_from("/api/health", peer, &[("X-Forwarded-For", "203.0.113.99")])
        .await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(limited.body["error"], "RATE_LIMITED");

    let other_peer: SocketAddr = "192.0.2.11:51000".parse().unwrap();
    let fresh = app.get_from("/api/health", other_peer, &[]).await;
    assert_eq!(fresh.status, StatusCode::OK);
}
