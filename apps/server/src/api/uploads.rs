use std::path::{Component, Path as StdPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Public prefix under which `uploads_dir` is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

const CATEGORIES: [&str; 3] = ["payments", "expenses", "documents"];
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    path: String,
    file_name: String,
}

/// `<uuid>-<category>.<ext>`; the extension is kept only when it is plain ASCII.
fn stored_file_name(category: &str, original: Option<&str>) -> String {
    let ext = original
        .and_then(|name| StdPath::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{}-{}{}", Uuid::new_v4(), category, ext)
}

/// Maps a public `/uploads/...` path back onto the uploads directory.
///
/// Anything that is not a plain relative path under the prefix yields `None`.
fn resolve_upload(uploads_dir: &StdPath, public_path: &str) -> Option<PathBuf> {
    let relative = public_path
        .strip_prefix(UPLOADS_ROUTE)?
        .trim_start_matches('/');
    let relative = StdPath::new(relative);
    if relative.as_os_str().is_empty()
        || !relative.components().all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(uploads_dir.join(relative))
}

/// Deletes an uploaded receipt. Missing files are not an error.
pub async fn remove_upload(uploads_dir: &StdPath, public_path: &str) {
    let Some(file) = resolve_upload(uploads_dir, public_path) else {
        tracing::warn!("Refusing to delete upload outside {}: {}", UPLOADS_ROUTE, public_path);
        return;
    };
    match tokio::fs::remove_file(&file).await {
        Ok(()) => tracing::debug!("Deleted upload {}", file.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to delete upload {}: {}", file.display(), e),
    }
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file content: {}", e)))?;
                file = Some((original, bytes.to_vec()));
            }
            "category" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read category: {}", e)))?;
                category = Some(value.trim().to_string());
            }
            _ => {}
        }
    }

    let (original, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Missing file in multipart request".to_string()))?;
    let category = category
        .filter(|c| CATEGORIES.contains(&c.as_str()))
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Category must be one of {}", CATEGORIES.join(", ")))
        })?;

    let file_name = stored_file_name(&category, original.as_deref());
    let dir = state.uploads_dir.join(&category);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create upload directory: {}", e)))?;
    tokio::fs::write(dir.join(&file_name), &bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save file: {}", e)))?;
    tracing::info!("Stored {} bytes as {}/{}", bytes.len(), category, file_name);

    Ok(Json(UploadResponse {
        path: format!("{}/{}/{}", UPLOADS_ROUTE, category, file_name),
        file_name,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
