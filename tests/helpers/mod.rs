//! Shared helpers for the HTTP integration tests.
//!
//! Every test app runs on in-memory record stores and a temporary upload
//! directory, so tests are independent and need no external services.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use ssahub_api::{AppState, build_app};
use ssahub_auth::PasswordHasher;
use ssahub_core::config::AppConfig;
use ssahub_database::Stores;
use ssahub_entity::user::UserRole;
use ssahub_service::UserService;
use ssahub_service::user::CreateUserRequest;
use ssahub_storage::BlobStore;

pub const PASSWORD: &str = "minutes2026";
const BOUNDARY: &str = "ssahub-test-boundary";

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
    users: UserService,
    uploads: TempDir,
}

/// A file part for [`TestApp::multipart`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

impl<'a> FilePart<'a> {
    pub fn pdf(field: &'a str) -> Self {
        Self {
            field,
            filename: "week-1 notes.pdf",
            content_type: "application/pdf",
            data: b"%PDF-1.4 lecture notes",
        }
    }

    pub fn png(field: &'a str) -> Self {
        Self {
            field,
            filename: "portrait.png",
            content_type: "image/png",
            data: b"\x89PNG\r\n\x1a\nportrait",
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// `data.<key>` as a string.
    pub fn data_str(&self, key: &str) -> String {
        self.body["data"][key].as_str().unwrap_or_default().to_string()
    }

    pub fn id(&self) -> Uuid {
        self.data_str("id").parse().expect("response carries an id")
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`], with a chance to adjust the config first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.storage.local.root_path = uploads.path().to_string_lossy().into_owned();
        config.storage.max_upload_size_bytes = 64 * 1024;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        adjust(&mut config);

        let stores = Stores::memory();
        let blobs = Arc::new(
            BlobStore::from_config(&config.storage)
                .await
                .expect("Failed to init blob store"),
        );
        let users = UserService::new(
            stores.users.clone(),
            Arc::new(PasswordHasher::new()),
            &config.auth,
        );

        let router = build_app(AppState::new(config.clone(), stores, blobs));

        Self {
            router,
            config,
            users,
            uploads,
        }
    }

    /// Create an account with [`PASSWORD`] and return a bearer token for it.
    pub async fn token_for(&self, username: &str, role: UserRole) -> String {
        let email = format!("{username}@ssa.example");
        self.users
            .create(CreateUserRequest {
                username: username.to_string(),
                email: email.clone(),
                password: PASSWORD.to_string(),
                role,
            })
            .await
            .expect("Failed to create test user");

        let response = self
            .json(
                "POST",
                "/api/auth/login",
                serde_json::json!({ "email": email, "password": PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin", UserRole::Admin).await
    }

    /// Files currently stored under one upload category folder.
    pub fn stored_files(&self, folder: &str) -> Vec<PathBuf> {
        std::fs::read_dir(self.uploads.path().join(folder))
            .map(|entries| entries.filter_map(|e| e.ok().map(|e| e.path())).collect())
            .unwrap_or_default()
    }

    /// Whether a `/uploads/...` locator exists on disk.
    pub fn locator_exists(&self, locator: &str) -> bool {
        locator
            .strip_prefix("/uploads/")
            .is_some_and(|rel| self.uploads.path().join(rel).is_file())
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(self.builder("GET", path, token), Body::empty()).await
    }

    /// GET as if sent from `peer`, with extra headers.
    pub async fn get_from(
        &self,
        path: &str,
        peer: SocketAddr,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = self.builder("GET", path, None).extension(ConnectInfo(peer));
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req, Body::empty()).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(self.builder("DELETE", path, token), Body::empty()).await
    }

    pub async fn json(
        &self,
        method: &str,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> TestResponse {
        let req = self
            .builder(method, path, token)
            .header("Content-Type", "application/json");
        let body = serde_json::to_vec(&body).expect("Failed to serialize body");
        self.send(req, Body::from(body)).await
    }

    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        fields: &[(&str, &str)],
        file: Option<FilePart<'_>>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.field, file.filename, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = self.builder(method, path, token).header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        self.send(req, Body::from(body)).await
    }

    fn builder(&self, method: &str, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    async fn send(&self, req: axum::http::request::Builder, body: Body) -> TestResponse {
        let req = req.body(body).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
