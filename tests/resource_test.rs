//! Integration tests for the resource upload lifecycle.

mod helpers;

use axum::http::StatusCode;
use helpers::{FilePart, TestApp};
use ssahub_entity::user::UserRole;

const PDF_FIELDS: &[(&str, &str)] = &[
    ("title", "Optics lecture notes"),
    ("description", "Week 1 slides"),
    ("type", "pdf"),
    ("department", "Physics"),
    ("subject", "Optics"),
    ("year", "Year 2"),
    ("semester", "1st"),
];

#[tokio::test]
async fn test_create_pdf_stores_file() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let file = response.data_str("file");
    assert!(file.starts_with("/uploads/resources/"));
    assert_eq!(response.data_str("url"), file);
    assert!(app.locator_exists(&file));
}

#[tokio::test]
async fn test_rejected_upload_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let zip = FilePart {
        field: "file",
        filename: "notes.zip",
        content_type: "application/zip",
        data: b"PK\x03\x04",
    };
    let response = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(zip), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.body["success"], false);
    assert!(app.stored_files("resources").is_empty());
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let data = vec![b'x'; app.config.storage.max_upload_size_bytes as usize + 1];
    let big = FilePart {
        data: &data,
        ..FilePart::pdf("file")
    };
    let response = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(big), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.stored_files("resources").is_empty());
}

#[tokio::test]
async fn test_file_kind_without_file_or_url_is_400() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .multipart("POST", "/api/resources", PDF_FIELDS, None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_switch_to_link_deletes_old_file() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&token))
        .await;
    let old_file = created.data_str("file");
    assert!(app.locator_exists(&old_file));

    let path = format!("/api/resources/{}", created.id());
    let updated = app
        .multipart(
            "PUT",
            &path,
            &[("type", "link"), ("url", "https://ocw.example.edu/optics")],
            None,
            Some(&token),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);
    assert_eq!(updated.data_str("url"), "https://ocw.example.edu/optics");
    assert_eq!(updated.data_str("file"), "");
    assert!(!app.locator_exists(&old_file));
}

#[tokio::test]
async fn test_replacing_file_prunes_previous_blob() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&token))
        .await;
    let old_file = created.data_str("file");

    let path = format!("/api/resources/{}", created.id());
    let updated = app
        .multipart("PUT", &path, &[], Some(FilePart::pdf("file")), Some(&token))
        .await;

    let new_file = updated.data_str("file");
    assert_ne!(new_file, old_file);
    assert!(app.locator_exists(&new_file));
    assert!(!app.locator_exists(&old_file));
    assert_eq!(app.stored_files("resources").len(), 1);
}

#[tokio::test]
async fn test_public_get_counts_downloads() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let created = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&token))
        .await;
    let path = format!("/api/resources/{}", created.id());

    app.get(&path, None).await;
    let second = app.get(&path, None).await;
    assert_eq!(second.body["data"]["downloadCount"], 2);

    let admin_view = app
        .get(&format!("/api/resources/admin/{}", created.id()), Some(&token))
        .await;
    assert_eq!(admin_view.body["data"]["downloadCount"], 2);
}

#[tokio::test]
async fn test_list_filters_and_hides_deleted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let link = app
        .multipart(
            "POST",
            "/api/resources",
            &[
                ("title", "Past papers"),
                ("description", "Archive"),
                ("type", "link"),
                ("url", "https://papers.example.edu"),
                ("department", "Maths"),
                ("subject", "Algebra"),
                ("year", "Year 1"),
            ],
            None,
            Some(&token),
        )
        .await;
    assert_eq!(link.status, StatusCode::CREATED);
    app.multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&token))
        .await;

    let maths = app.get("/api/resources?department=Maths", None).await;
    assert_eq!(maths.body["count"], 1);

    let all = app.get("/api/resources?department=all", None).await;
    assert_eq!(all.body["count"], 2);

    let path = format!("/api/resources/{}", link.id());
    let deleted = app.delete(&path, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["isActive"], false);

    let after = app.get("/api/resources", None).await;
    assert_eq!(after.body["count"], 1);
    assert_eq!(app.get(&path, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_link_update_with_type_but_no_url_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let link = app
        .multipart(
            "POST",
            "/api/resources",
            &[
                ("title", "Lab manual"),
                ("description", "Hosted externally"),
                ("type", "video"),
                ("url", "https://videos.example.edu/lab"),
                ("department", "Physics"),
                ("subject", "Optics"),
                ("year", "Year 2"),
            ],
            None,
            Some(&token),
        )
        .await;
    let path = format!("/api/resources/{}", link.id());

    let retyped = app
        .multipart("PUT", &path, &[("type", "video")], None, Some(&token))
        .await;
    assert_eq!(retyped.status, StatusCode::BAD_REQUEST);
    assert_eq!(retyped.body["error"], "MISSING_REQUIRED_FIELD");

    let with_file = app
        .multipart("PUT", &path, &[], Some(FilePart::pdf("file")), Some(&token))
        .await;
    assert_eq!(with_file.status, StatusCode::BAD_REQUEST);
    assert!(app.stored_files("resources").is_empty());
}

#[tokio::test]
async fn test_mutations_require_admin() {
    let app = TestApp::new().await;

    let anonymous = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let editor = app.token_for("editor", UserRole::Editor).await;
    let forbidden = app
        .multipart("POST", "/api/resources", PDF_FIELDS, Some(FilePart::pdf("file")), Some(&editor))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert!(app.stored_files("resources").is_empty());
}
