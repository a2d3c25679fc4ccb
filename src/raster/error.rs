//! Rasterization error types

use thiserror::Error;

/// Errors raised while turning an upload into page bitmaps
#[derive(Debug, Error)]
pub enum RasterError {
    /// The upload is not a readable PDF (or supported image)
    #[error("Could not read the uploaded file as a PDF: {0}")]
    DocumentParse(String),

    /// Page index outside `[0, page_count)`
    #[error("Page index {index} is out of range (document has {page_count} pages)")]
    PageIndex { index: usize, page_count: usize },

    /// MuPDF produced a pixmap we could not turn into an RGB bitmap
    #[error("Failed to render page: {0}")]
    Pixmap(String),
}

/// Result type alias for rasterization
pub type RasterResult<T> = std::result::Result<T, RasterError>;
