//! Web API File Tests
//!
//! Integration tests for the upload and delete endpoints.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use preview_store::web::handlers::AppState;
use preview_store::web::router::{create_health_router, create_router};
use preview_store::ScopedFileStore;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Maximum upload size used by the test server (1MB).
const TEST_MAX_UPLOAD: u64 = 1024 * 1024;

/// Create a test server backed by a temporary storage root.
fn create_test_server() -> (TestServer, TempDir, ScopedFileStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ScopedFileStore::new(temp_dir.path().join("preview"))
        .expect("Failed to create store");

    let app_state = Arc::new(AppState::new(store.clone(), TEST_MAX_UPLOAD));
    let router = create_router(app_state, &[]).merge(create_health_router());

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir, store)
}

/// Build an upload form with a folder name and a single file.
fn upload_form(folder: &str, file_name: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_text("folderName", folder).add_part(
        "file",
        Part::bytes(content.to_vec())
            .file_name(file_name)
            .mime_type("application/octet-stream"),
    )
}

async fn upload(server: &TestServer, folder: &str, file_name: &str, content: &[u8]) -> Value {
    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form(folder, file_name, content))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

async fn delete(server: &TestServer, folder: &str, file_name: &str) -> axum_test::TestResponse {
    server
        .delete("/api/deletefile")
        .json(&json!({
            "folderName": folder,
            "fileName": file_name
        }))
        .await
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_success() {
    let (server, _temp_dir, store) = create_test_server();
    let content = b"\x89PNG\r\n\x1a\nfake image";

    let body = upload(&server, "projectA", "logo.png", content).await;

    let expected_path = store.root().join("projectA").join("logo.png");
    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(
        body["file_path"].as_str().unwrap(),
        expected_path.to_string_lossy()
    );
    assert_eq!(fs::read(&expected_path).unwrap(), content);
}

#[tokio::test]
async fn test_upload_overwrites_existing_file() {
    let (server, _temp_dir, store) = create_test_server();

    upload(&server, "projectA", "notes.txt", b"first").await;
    upload(&server, "projectA", "notes.txt", b"second version").await;

    let path = store.root().join("projectA").join("notes.txt");
    assert_eq!(fs::read(path).unwrap(), b"second version");
}

#[tokio::test]
async fn test_upload_strips_client_directories() {
    let (server, _temp_dir, store) = create_test_server();

    let body = upload(&server, "projectA", "uploads/2024/logo.png", b"data").await;

    let expected_path = store.root().join("projectA").join("logo.png");
    assert_eq!(
        body["file_path"].as_str().unwrap(),
        expected_path.to_string_lossy()
    );
    assert!(expected_path.exists());
}

#[tokio::test]
async fn test_upload_missing_folder_name() {
    let (server, _temp_dir, _store) = create_test_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"data".to_vec()).file_name("logo.png"),
    );
    let response = server.post("/api/savefile/preview").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Folder name or file is missing" }));
}

#[tokio::test]
async fn test_upload_missing_file() {
    let (server, _temp_dir, _store) = create_test_server();

    let form = MultipartForm::new().add_text("folderName", "projectA");
    let response = server.post("/api/savefile/preview").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Folder name or file is missing");
}

#[tokio::test]
async fn test_upload_empty_folder_name() {
    let (server, _temp_dir, store) = create_test_server();

    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form("", "logo.png", b"data"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(fs::read_dir(store.root()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_upload_traversal_folder_rejected() {
    let (server, temp_dir, store) = create_test_server();

    for folder in ["..", "../outside", "a/../..", "/tmp"] {
        let response = server
            .post("/api/savefile/preview")
            .multipart(upload_form(folder, "escape.txt", b"evil"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    assert!(fs::read_dir(store.root()).unwrap().next().is_none());
    assert!(!temp_dir.path().join("escape.txt").exists());
    assert!(!temp_dir.path().join("outside").exists());
}

#[tokio::test]
async fn test_upload_dot_dot_file_name_rejected() {
    let (server, _temp_dir, _store) = create_test_server();

    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form("projectA", "..", b"evil"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_too_large() {
    let (server, _temp_dir, store) = create_test_server();
    let content = vec![0u8; TEST_MAX_UPLOAD as usize + 1];

    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form("projectA", "big.bin", &content))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "File too large (max 1MB)");
    assert!(!store.root().join("projectA").exists());
}

#[tokio::test]
async fn test_upload_over_body_limit() {
    let (server, _temp_dir, store) = create_test_server();
    let content = vec![0u8; 2 * TEST_MAX_UPLOAD as usize];

    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form("projectA", "huge.bin", &content))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "File too large (max 1MB)");
    assert!(!store.root().join("projectA").exists());
}

#[tokio::test]
async fn test_upload_storage_failure_hides_path() {
    let (server, _temp_dir, store) = create_test_server();

    // A regular file where the folder should be makes directory creation fail
    fs::write(store.root().join("blocked"), b"not a directory").unwrap();

    let response = server
        .post("/api/savefile/preview")
        .multipart(upload_form("blocked", "logo.png", b"data"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains(&*store.root().to_string_lossy()));
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_success() {
    let (server, _temp_dir, store) = create_test_server();
    upload(&server, "projectA", "logo.png", b"data").await;

    let response = delete(&server, "projectA", "logo.png").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "message": "File deleted successfully" }));
    assert!(!store.root().join("projectA").join("logo.png").exists());
    assert!(store.root().join("projectA").is_dir());
}

#[tokio::test]
async fn test_delete_twice_not_found() {
    let (server, _temp_dir, _store) = create_test_server();
    upload(&server, "projectA", "logo.png", b"data").await;

    delete(&server, "projectA", "logo.png").await.assert_status_ok();

    let response = delete(&server, "projectA", "logo.png").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "File not found" }));
}

#[tokio::test]
async fn test_delete_unknown_folder_not_found() {
    let (server, _temp_dir, _store) = create_test_server();

    let response = delete(&server, "nope", "logo.png").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_is_regular_file_not_found() {
    let (server, _temp_dir, store) = create_test_server();
    fs::write(store.root().join("blocked"), b"not a directory").unwrap();

    let response = delete(&server, "blocked", "logo.png").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "File not found" }));
}

#[tokio::test]
async fn test_delete_missing_fields() {
    let (server, _temp_dir, _store) = create_test_server();

    let response = server
        .delete("/api/deletefile")
        .json(&json!({ "folderName": "projectA" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Folder name or file name is missing" }));

    let response = server
        .delete("/api/deletefile")
        .json(&json!({ "folderName": "", "fileName": "logo.png" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_invalid_json() {
    let (server, _temp_dir, _store) = create_test_server();

    let response = server
        .delete("/api/deletefile")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_delete_traversal_rejected() {
    let (server, temp_dir, _store) = create_test_server();
    let victim = temp_dir.path().join("victim.txt");
    fs::write(&victim, b"keep me").unwrap();

    let response = delete(&server, "..", "victim.txt").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = delete(&server, "projectA", "../../victim.txt").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(victim.exists());
}

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn test_upload_delete_scenario() {
    let (server, _temp_dir, store) = create_test_server();
    let bytes: Vec<u8> = (0..=255).collect();

    let body = upload(&server, "projectA", "logo.png", &bytes).await;
    let path = store.root().join("projectA").join("logo.png");
    assert_eq!(body["file_path"].as_str().unwrap(), path.to_string_lossy());
    assert_eq!(fs::read(&path).unwrap(), bytes);

    delete(&server, "projectA", "logo.png")
        .await
        .assert_status_ok();
    assert!(!path.exists());

    delete(&server, "projectA", "logo.png")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (server, _temp_dir, _store) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}
