//! Integration tests for the web server

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use foresight_store::CredentialStore;
use foresight_web::handlers::{create_router, AppState, HealthCheckResponse};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

const BOUNDARY: &str = "foresight-test-boundary";

/// Helper to create test application state with an existing source directory
fn create_test_state(dir: &TempDir) -> AppState {
    let source = dir.path().join("data_source");
    fs::create_dir_all(&source).unwrap();
    AppState::new(source, CredentialStore::new(dir.path().join("config.json")))
}

fn app(state: &AppState) -> Router {
    create_router(state.clone(), 1024 * 1024)
}

/// Build a multipart body; each part is (field name, file name, content)
fn multipart_body(parts: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (field, file_name, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        ));
        body.push_str("Content-Type: text/plain\r\n\r\n");
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

async fn post_upload(state: &AppState, parts: &[(&str, &str, &str)]) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    if status == StatusCode::SEE_OTHER {
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
    status
}

async fn post_api_key(state: &AppState, form_body: &str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/update_api_key")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .unwrap();

    app(state).oneshot(request).await.unwrap().status()
}

async fn get_page(state: &AppState) -> String {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_upload_saves_files_unmodified() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    let status = post_upload(
        &state,
        &[
            ("files[]", "2023-Mar-15-AAPL.NASDAQ-Transcript.txt", "Operator: Good afternoon."),
            ("files[]", "2023-Apr-20-IBM.NYSE-Transcript.txt", "CFO: We expect 5% growth."),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let saved = fs::read_to_string(
        state.source_dir.join("2023-Mar-15-AAPL.NASDAQ-Transcript.txt"),
    )
    .unwrap();
    assert_eq!(saved, "Operator: Good afternoon.");
    assert!(state.source_dir.join("2023-Apr-20-IBM.NYSE-Transcript.txt").exists());

    let page = get_page(&state).await;
    assert!(page.contains(
        "Uploaded 2 file(s): 2023-Mar-15-AAPL.NASDAQ-Transcript.txt, 2023-Apr-20-IBM.NYSE-Transcript.txt"
    ));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    post_upload(&state, &[("files[]", "a-Transcript.txt", "x")]).await;

    assert!(get_page(&state).await.contains("Uploaded 1 file(s): a-Transcript.txt"));
    assert!(!get_page(&state).await.contains("Uploaded"));
}

#[tokio::test]
async fn test_upload_without_files() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    // Browsers send an empty file name when nothing was chosen
    let status = post_upload(&state, &[("files[]", "", "")]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let page = get_page(&state).await;
    assert!(page.contains("<div class=\"flash error\">No files selected</div>"));
    assert_eq!(fs::read_dir(state.source_dir.as_path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_strips_path_components() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    post_upload(&state, &[("files[]", "../../escape-Transcript.txt", "data")]).await;

    assert!(state.source_dir.join("escape-Transcript.txt").exists());
    assert!(!dir.path().join("escape-Transcript.txt").exists());
}

#[tokio::test]
async fn test_upload_ignores_other_fields() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    post_upload(
        &state,
        &[
            ("attachment", "other-Transcript.txt", "ignored"),
            ("files[]", "kept-Transcript.txt", "kept"),
        ],
    )
    .await;

    assert!(state.source_dir.join("kept-Transcript.txt").exists());
    assert!(!state.source_dir.join("other-Transcript.txt").exists());
}

#[tokio::test]
async fn test_upload_into_missing_directory_flashes_error() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(
        dir.path().join("not-created"),
        CredentialStore::new(dir.path().join("config.json")),
    );

    let status = post_upload(&state, &[("files[]", "a-Transcript.txt", "x")]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(get_page(&state).await.contains("Upload failed for a-Transcript.txt"));
}

#[tokio::test]
async fn test_update_api_key_trims_and_persists() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    let status = post_api_key(&state, "api_key=++sk-from-form++").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    assert_eq!(state.credentials.load().unwrap().as_deref(), Some("sk-from-form"));
    let page = get_page(&state).await;
    assert!(page.contains("API key updated"));
    assert!(page.contains("An API key is configured."));
}

#[tokio::test]
async fn test_update_api_key_rejects_blank() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    post_api_key(&state, "api_key=+++").await;

    assert_eq!(state.credentials.load().unwrap(), None);
    assert!(get_page(&state)
        .await
        .contains("<div class=\"flash error\">API key must not be empty</div>"));
}

#[tokio::test]
async fn test_update_api_key_missing_field() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    let status = post_api_key(&state, "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(get_page(&state).await.contains("API key must not be empty"));
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.api_key_configured);
    assert!(health.source_dir.ends_with("data_source"));

    state.credentials.save("sk-live").unwrap();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert!(health.api_key_configured);
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let big = "x".repeat(4096);

    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(&[("files[]", "big-Transcript.txt", &big)])))
        .unwrap();

    let response = create_router(state.clone(), 1024).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
    assert!(!state.source_dir.join("big-Transcript.txt").exists());
}
