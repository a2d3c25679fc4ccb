//! OCR Overlay Server Library
//!
//! Upload a PDF, rasterize each page, OCR it, and view every recognized word
//! as a box drawn over the page image. The binary in `main.rs` only wires
//! configuration, logging and the listener around `routes::router`.
//!
//! # Modules
//!
//! - `raster`: PDF/image upload to per-page RGB bitmaps
//! - `mupdf`: request-scoped MuPDF document handle
//! - `ocr`: text locator trait, Tesseract CLI locator, fragment filter
//! - `html`: overlay rendering and page shells
//! - `pipeline`: per-request orchestration
//! - `routes`: axum handlers

pub mod config;
pub mod error;
pub mod html;
pub mod mupdf;
pub mod ocr;
pub mod pipeline;
pub mod raster;
pub mod routes;
pub mod state;
