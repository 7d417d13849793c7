//! HTTP request handlers for the web server.
//!
//! Implements the upload form, the API-key form and a health check using axum.

use crate::flash::{Flash, FlashSlot};
use crate::page::render_index;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router as AxumRouter,
};
use foresight_store::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Multipart field carrying transcript files
pub const FILES_FIELD: &str = "files[]";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Directory uploads are written into
    pub source_dir: Arc<PathBuf>,
    /// Where the oracle API key is persisted
    pub credentials: Arc<CredentialStore>,
    /// Pending flash message
    pub flash: Arc<FlashSlot>,
}

impl AppState {
    /// Create state for the given upload directory and credential store
    pub fn new(source_dir: impl Into<PathBuf>, credentials: CredentialStore) -> Self {
        Self {
            source_dir: Arc::new(source_dir.into()),
            credentials: Arc::new(credentials),
            flash: Arc::new(FlashSlot::new()),
        }
    }

    fn api_key_configured(&self) -> bool {
        matches!(self.credentials.load(), Ok(Some(_)))
    }
}

/// API-key form body
#[derive(Debug, Deserialize)]
pub struct ApiKeyForm {
    /// Submitted key, possibly padded with whitespace
    #[serde(default)]
    pub api_key: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the server answers
    pub status: String,
    /// Upload directory
    pub source_dir: String,
    /// Whether a non-empty API key is stored
    pub api_key_configured: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The multipart body could not be read
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Final path component of a client-supplied file name
///
/// Both `/` and `\` count as separators. `None` when nothing usable is left.
pub fn base_name(file_name: &str) -> Option<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// GET / - Upload and API-key forms
async fn index(State(state): State<AppState>) -> Html<String> {
    let flash = state.flash.take().await;
    Html(render_index(flash.as_ref(), state.api_key_configured()))
}

/// POST /upload - Save every submitted transcript into the source directory
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut saved = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().and_then(base_name).map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;

        let target = state.source_dir.join(&name);
        if let Err(e) = tokio::fs::write(&target, &data).await {
            error!("Failed to save {}: {}", target.display(), e);
            state
                .flash
                .set(Flash::error(format!("Upload failed for {}: {}", name, e)))
                .await;
            return Ok(Redirect::to("/"));
        }
        info!("Saved upload {} ({} bytes)", target.display(), data.len());
        saved.push(name);
    }

    let flash = if saved.is_empty() {
        warn!("Upload request without files");
        Flash::error("No files selected")
    } else {
        Flash::success(format!(
            "Uploaded {} file(s): {}",
            saved.len(),
            saved.join(", ")
        ))
    };
    state.flash.set(flash).await;

    Ok(Redirect::to("/"))
}

/// POST /update_api_key - Persist a new oracle API key
async fn update_api_key(State(state): State<AppState>, Form(form): Form<ApiKeyForm>) -> Redirect {
    let key = form.api_key.trim();

    let flash = if key.is_empty() {
        Flash::error("API key must not be empty")
    } else {
        match state.credentials.save(key) {
            Ok(()) => {
                info!("API key updated in {}", state.credentials.path().display());
                Flash::success("API key updated")
            }
            Err(e) => {
                error!("Failed to store API key: {}", e);
                Flash::error(format!("Failed to store API key: {}", e))
            }
        }
    };
    state.flash.set(flash).await;

    Redirect::to("/")
}

/// GET /health - Liveness and setup status
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        source_dir: state.source_dir.display().to_string(),
        api_key_configured: state.api_key_configured(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState, max_upload_bytes: usize) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/update_api_key", post(update_api_key))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(dir: &TempDir) -> AppState {
        AppState::new(
            dir.path().join("data_source"),
            CredentialStore::new(dir.path().join("config.json")),
        )
    }

    #[test]
    fn test_base_name() {
        assert_eq!(
            base_name("2023-Mar-15-AAPL.NASDAQ-Transcript.txt"),
            Some("2023-Mar-15-AAPL.NASDAQ-Transcript.txt")
        );
        assert_eq!(base_name("../../etc/passwd"), Some("passwd"));
        assert_eq!(base_name("C:\\calls\\a.txt"), Some("a.txt"));
        assert_eq!(base_name(""), None);
        assert_eq!(base_name("dir/.."), None);
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&dir), 1024);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index() {
        let dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&dir), 1024);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
