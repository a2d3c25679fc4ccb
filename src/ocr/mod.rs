//! OCR Module
//!
//! Locates text on rasterized pages and filters the raw engine output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ocr_overlay_server::ocr::{FragmentFilter, TesseractConfig, TesseractLocator, TextLocator};
//!
//! let locator = TesseractLocator::new(TesseractConfig::default())?;
//! let raw = locator.locate(&page).await?;
//! let boxes = FragmentFilter::default().apply(raw);
//! ```

mod filter;
mod provider;
mod tsv;
mod types;

pub use filter::FragmentFilter;
pub use provider::{TesseractConfig, TesseractLocator, TextLocator};
pub use types::{OcrError, TextFragment};
