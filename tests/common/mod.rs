//! Shared helpers for HTTP tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;

use ocr_overlay_server::config::Config;
use ocr_overlay_server::ocr::{OcrError, TextFragment, TextLocator};
use ocr_overlay_server::raster::PageImage;
use ocr_overlay_server::routes;
use ocr_overlay_server::state::AppState;

pub use ocr_overlay_server::raster::fixtures::{blank_pdf, build_pdf, hello_pdf};

pub const BOUNDARY: &str = "ocr-overlay-test-boundary";

/// Locator stub returning canned fragments for every page
pub struct StubLocator {
    pub fragments: Vec<TextFragment>,
    pub calls: AtomicUsize,
}

impl StubLocator {
    pub fn new(fragments: Vec<TextFragment>) -> Arc<Self> {
        Arc::new(Self {
            fragments,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextLocator for StubLocator {
    fn engine_name(&self) -> &str {
        "stub"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn locate(&self, page: &PageImage) -> Result<Vec<TextFragment>, OcrError> {
        assert!(page.width() > 0 && page.height() > 0);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.fragments.clone())
    }
}

/// Test config: low DPI keeps bitmaps small
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.render.dpi = 72;
    config
}

pub fn app_with_locator(locator: Arc<dyn TextLocator>) -> Router {
    routes::router(AppState::with_locator(test_config(), locator))
}

/// App wired to the real Tesseract locator with the given binary path
pub fn app_with_tesseract(binary: &str) -> Router {
    let mut config = test_config();
    config.ocr.tesseract_cmd = binary.to_string();
    routes::router(AppState::new(config).expect("valid config"))
}

/// Build a multipart/form-data POST /upload request with one file field
pub fn upload_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

pub const IMG_TAG: &str = "<img ";
pub const BOX_CLASS: &str = "class=\"ocr-box\"";
