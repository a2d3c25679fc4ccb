//! Upload pipeline
//!
//! One linear pass per request:
//!
//! ```text
//! Received -> Parsed -> Rasterized -> Recognized -> Filtered -> Rendered -> Responded
//!     \__________\___________\____________\____________\___________\___> Error
//! ```
//!
//! A blocking task opens the document and renders pages into a bounded
//! channel. Each page is recognized, filtered and turned into its HTML
//! section before the next one is taken, so only the section markup of
//! finished pages is kept. The first error aborts the request, nothing
//! partial is returned.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::html::{render_page, results_page};
use crate::ocr::{FragmentFilter, TextLocator};
use crate::raster::{PageImage, RasterEvent, Rasterizer};

/// Pages rendered ahead of the OCR engine
const PAGE_BUFFER: usize = 1;

/// Request lifecycle stage, recorded in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Parsed,
    Rasterized,
    Recognized,
    Filtered,
    Rendered,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Parsed => "parsed",
            Stage::Rasterized => "rasterized",
            Stage::Recognized => "recognized",
            Stage::Filtered => "filtered",
            Stage::Rendered => "rendered",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Raw upload; lives only for the duration of the request
#[derive(Debug)]
pub struct UploadedDocument {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}

/// Pipeline result
#[derive(Debug)]
pub struct PipelineOutput {
    pub html: String,
    pub pages: usize,
    pub fragments: usize,
}

/// Rasterize, OCR, filter, render
pub struct OcrPipeline {
    rasterizer: Rasterizer,
    locator: Arc<dyn TextLocator>,
    filter: FragmentFilter,
}

impl OcrPipeline {
    pub fn new(rasterizer: Rasterizer, locator: Arc<dyn TextLocator>, filter: FragmentFilter) -> Self {
        Self {
            rasterizer,
            locator,
            filter,
        }
    }

    pub fn rasterizer(&self) -> Rasterizer {
        self.rasterizer
    }

    pub fn locator(&self) -> &Arc<dyn TextLocator> {
        &self.locator
    }

    pub fn filter(&self) -> FragmentFilter {
        self.filter
    }

    /// Run the whole pipeline for one upload
    pub async fn run(&self, upload: UploadedDocument) -> Result<PipelineOutput> {
        let upload_id = Uuid::new_v4();
        let span = tracing::info_span!("upload", %upload_id, file = %upload.file_name);
        self.run_inner(upload).instrument(span).await
    }

    async fn run_inner(&self, upload: UploadedDocument) -> Result<PipelineOutput> {
        let UploadedDocument { file_name, data } = upload;
        tracing::info!(stage = %Stage::Received, bytes = data.len(), "Processing upload");

        if data.is_empty() {
            return Err(AppError::EmptyUpload);
        }

        let (tx, mut rx) = mpsc::channel::<RasterEvent>(PAGE_BUFFER);
        let rasterizer = self.rasterizer;
        let name = file_name.clone();
        let span = tracing::Span::current();
        let raster_task = tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            rasterizer.stream(&data, &name, |event| tx.blocking_send(event).is_ok())
        });

        let mut sections = String::new();
        let mut page_count = 0;
        let mut fragment_count = 0;

        while let Some(event) = rx.recv().await {
            match event {
                RasterEvent::Opened { page_count: total } => {
                    tracing::debug!(stage = %Stage::Parsed, pages = total, dpi = rasterizer.dpi());
                }
                RasterEvent::Page(page) => {
                    tracing::debug!(stage = %Stage::Rasterized, page = page.index);
                    let (section, kept) = self.process_page(page).await?;
                    sections.push_str(&section);
                    page_count += 1;
                    fragment_count += kept;
                }
            }
        }

        // Surfaces parse and pixmap errors once the channel closes
        raster_task
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

        let html = results_page(&file_name, page_count, fragment_count, &sections);
        tracing::info!(
            stage = %Stage::Responded,
            pages = page_count,
            fragments = fragment_count,
            html_bytes = html.len(),
            "Upload processed"
        );

        Ok(PipelineOutput {
            html,
            pages: page_count,
            fragments: fragment_count,
        })
    }

    /// Recognize, filter and render one page; the bitmap is dropped here
    async fn process_page(&self, page: PageImage) -> Result<(String, usize)> {
        let raw = self.locator.locate(&page).await?;
        let raw_count = raw.len();
        tracing::debug!(stage = %Stage::Recognized, page = page.index, fragments = raw_count);

        let fragments = self.filter.apply(raw);
        let kept = fragments.len();
        tracing::debug!(
            stage = %Stage::Filtered,
            page = page.index,
            kept,
            dropped = raw_count - kept
        );

        let index = page.index;
        let section = tokio::task::spawn_blocking(move || render_page(&page, &fragments))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;
        tracing::debug!(stage = %Stage::Rendered, page = index, html_bytes = section.len());

        Ok((section, kept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{OcrError, TextFragment};
    use crate::raster::fixtures::{blank_pdf, build_pdf};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the same fragments for every page and counts calls
    struct FixedLocator {
        fragments: Vec<TextFragment>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextLocator for FixedLocator {
        fn engine_name(&self) -> &str {
            "fixed"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn locate(&self, _page: &PageImage) -> std::result::Result<Vec<TextFragment>, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fragments.clone())
        }
    }

    #[derive(Default)]
    struct UnavailableLocator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextLocator for UnavailableLocator {
        fn engine_name(&self) -> &str {
            "unavailable"
        }

        async fn is_available(&self) -> bool {
            false
        }

        async fn locate(&self, _page: &PageImage) -> std::result::Result<Vec<TextFragment>, OcrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(OcrError::EngineUnavailable("not installed".into()))
        }
    }

    fn pipeline(locator: Arc<dyn TextLocator>) -> OcrPipeline {
        OcrPipeline::new(Rasterizer::new(72), locator, FragmentFilter::default())
    }

    #[tokio::test]
    async fn test_runs_every_page_and_filters() {
        let locator = Arc::new(FixedLocator {
            fragments: vec![
                TextFragment::new("", 0, 0, 10, 10, -1),
                TextFragment::new("HELLO", 5, 5, 30, 10, 91),
                TextFragment::new(" ", 1, 1, 1, 1, 60),
            ],
            calls: AtomicUsize::new(0),
        });
        let pdf = build_pdf(&[(100.0, 100.0, ""), (100.0, 100.0, "")]);

        let output = pipeline(locator.clone())
            .run(UploadedDocument::new("two.pdf", pdf))
            .await
            .unwrap();

        assert_eq!(locator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(output.pages, 2);
        assert_eq!(output.fragments, 2);
        assert_eq!(output.html.matches("<img ").count(), 2);
        assert_eq!(output.html.matches("class=\"ocr-box\"").count(), 2);
    }

    #[tokio::test]
    async fn test_empty_upload() {
        let result = pipeline(Arc::new(UnavailableLocator::default()))
            .run(UploadedDocument::new("empty.pdf", Vec::new()))
            .await;
        assert!(matches!(result, Err(AppError::EmptyUpload)));
    }

    #[tokio::test]
    async fn test_parse_error_stops_before_ocr() {
        let locator = Arc::new(FixedLocator {
            fragments: vec![],
            calls: AtomicUsize::new(0),
        });
        let result = pipeline(locator.clone())
            .run(UploadedDocument::new("notes.pdf", b"not a pdf at all".to_vec()))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Raster(crate::raster::RasterError::DocumentParse(_)))
        ));
        assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_engine_unavailable_propagates() {
        let result = pipeline(Arc::new(UnavailableLocator::default()))
            .run(UploadedDocument::new("blank.pdf", blank_pdf()))
            .await;
        assert!(matches!(
            result,
            Err(AppError::Ocr(OcrError::EngineUnavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_image_bytes_named_pdf_are_rejected() {
        let locator = Arc::new(FixedLocator {
            fragments: vec![],
            calls: AtomicUsize::new(0),
        });
        let mut png = Vec::new();
        image::RgbImage::from_pixel(16, 16, image::Rgb([0, 0, 0]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let result = pipeline(locator.clone())
            .run(UploadedDocument::new("renamed.pdf", png))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Raster(crate::raster::RasterError::DocumentParse(_)))
        ));
        assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_ocr_failure_stops_remaining_pages() {
        let locator = Arc::new(UnavailableLocator::default());
        let pdf = build_pdf(&[(72.0, 72.0, ""), (72.0, 72.0, ""), (72.0, 72.0, "")]);

        let result = pipeline(locator.clone())
            .run(UploadedDocument::new("three.pdf", pdf))
            .await;

        assert!(matches!(result, Err(AppError::Ocr(_))));
        assert_eq!(locator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Received.to_string(), "received");
        assert_eq!(Stage::Responded.to_string(), "responded");
    }
}
