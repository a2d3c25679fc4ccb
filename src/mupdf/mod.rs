//! Low-level MuPDF Wrapper
//!
//! Thin, request-scoped wrapper around the `mupdf` crate.
//!
//! MuPDF's `fz_context` is **NOT thread-safe**, so a `PdfDocument` is never
//! shared: it is opened, used and dropped inside a single blocking task. The
//! document handle is released on every exit path by `Drop`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ocr_overlay_server::mupdf::PdfDocument;
//!
//! let doc = PdfDocument::from_bytes(&pdf_bytes)?;
//! for index in 0..doc.page_count() {
//!     let pixmap = doc.render_pixmap(index, 200)?;
//! }
//! ```

mod document;

pub use document::PdfDocument;
