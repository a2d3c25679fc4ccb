//! Error types for the OCR overlay server
//!
//! Every stage error folds into `AppError`, which renders as an HTML error
//! page. No stage retries; the first failure ends the request.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::html::{error_page, RenderError};
use crate::ocr::OcrError;
use crate::raster::RasterError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file provided. Use the form field name 'file'")]
    MissingFile,

    #[error("The uploaded file is empty")]
    EmptyUpload,

    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("Failed to render results: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile | AppError::EmptyUpload => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::Raster(RasterError::DocumentParse(_)) => StatusCode::BAD_REQUEST,
            AppError::Raster(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Ocr(e) => e.status_code(),
            AppError::Render(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short heading for the error page
    pub fn title(&self) -> &'static str {
        match self {
            AppError::MissingFile | AppError::EmptyUpload | AppError::Multipart(_) => "Bad upload",
            AppError::Raster(RasterError::DocumentParse(_)) => "Unreadable document",
            AppError::Raster(RasterError::PageIndex { .. }) => "Page out of range",
            AppError::Raster(RasterError::Pixmap(_)) => "Rendering failed",
            AppError::Ocr(OcrError::EngineUnavailable(_)) => "OCR engine unavailable",
            AppError::Ocr(_) => "OCR failed",
            AppError::Render(_) => "Rendering failed",
            AppError::Internal(_) => "Internal error",
        }
    }

    fn user_message(&self) -> String {
        match self {
            AppError::Ocr(OcrError::EngineUnavailable(_)) => format!(
                "{}. Install Tesseract or point TESSERACT_CMD at the tesseract binary.",
                self
            ),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        let body = error_page(status, self.title(), &self.user_message());
        (status, Html(body)).into_response()
    }
}
