//! Upload Routes
//!
//! - POST /upload - multipart upload (field `file` or `document`), returns the
//!   OCR overlay page or an HTML error page

use axum::{
    extract::{Multipart, State},
    response::Html,
    routing::post,
    Router,
};

use crate::error::{AppError, Result};
use crate::pipeline::UploadedDocument;
use crate::state::AppState;

/// Field names accepted for the uploaded file
const FILE_FIELDS: &[&str] = &["file", "document"];

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// POST /upload
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Html<String>> {
    tracing::debug!("Starting upload processing");

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::from(e)
    })? {
        let name = field.name().unwrap_or("").to_string();
        let content_type = field.content_type().map(|s| s.to_string());

        tracing::debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            field.file_name(),
            content_type
        );

        if !FILE_FIELDS.contains(&name.as_str()) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            AppError::from(e)
        })?;

        tracing::debug!("Read {} bytes of file data", data.len());

        let output = state
            .pipeline()
            .run(UploadedDocument::new(file_name, data.to_vec()))
            .await?;

        return Ok(Html(output.html));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::MissingFile)
}
