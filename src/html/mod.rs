//! HTML rendering module
//!
//! Builds the upload form, the OCR overlay results and error pages as plain
//! strings. Page rendering is a pure function per page; the results page wraps
//! the concatenation of those sections.

mod overlay;
mod pages;

pub use overlay::{render_page, RenderError};
pub use pages::{error_page, index_page, results_page};
