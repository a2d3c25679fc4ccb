//! Application state management
//!
//! Holds only immutable configuration and the pipeline; no request data is
//! ever stored here.

use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{FragmentFilter, OcrError, TesseractLocator, TextLocator};
use crate::pipeline::OcrPipeline;
use crate::raster::Rasterizer;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize OCR engine: {0}")]
    OcrInit(#[from] OcrError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: OcrPipeline,
}

impl AppState {
    /// Create state backed by the Tesseract CLI named in the configuration
    pub fn new(config: Config) -> Result<Self, StateError> {
        let locator = TesseractLocator::new(config.tesseract())?;
        Ok(Self::with_locator(config, Arc::new(locator)))
    }

    /// Create state with an explicit locator
    pub fn with_locator(config: Config, locator: Arc<dyn TextLocator>) -> Self {
        let pipeline = OcrPipeline::new(
            Rasterizer::new(config.render.dpi),
            locator,
            FragmentFilter::new(config.ocr.min_confidence),
        );

        Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the upload pipeline
    pub fn pipeline(&self) -> &OcrPipeline {
        &self.inner.pipeline
    }
}
