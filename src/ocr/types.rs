//! OCR Types
//!
//! Fragments are reported in the pixel space of the `PageImage` they were
//! recognized from; nothing here rescales them.

use axum::http::StatusCode;

/// One recognized text region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// Recognized text, untrimmed as reported by the engine
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Engine confidence; -1 means "no text here"
    pub confidence: i32,
}

impl TextFragment {
    pub fn new(
        text: impl Into<String>,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        confidence: i32,
    ) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
            confidence,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// Binary missing, not executable, or exited unsuccessfully
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Invalid page image: {0}")]
    InvalidImage(String),

    #[error("Invalid OCR language code: {0}")]
    InvalidLanguage(String),

    #[error("Unexpected OCR engine output: {0}")]
    MalformedOutput(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EngineUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_edges() {
        let fragment = TextFragment::new("HELLO", 10, 20, 30, 40, 96);
        assert_eq!(fragment.right(), 40);
        assert_eq!(fragment.bottom(), 60);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            OcrError::EngineUnavailable("missing".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            OcrError::MalformedOutput("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
