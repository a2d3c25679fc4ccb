//! Page rasterizer
//!
//! Turns an uploaded buffer into one `PageImage` per page. PDFs are rendered
//! through MuPDF at the configured DPI; raster image uploads are decoded
//! directly and treated as a single page.
//!
//! Pages are handed to a sink as soon as they are rendered, so a caller never
//! has to hold every bitmap of a long document at once.

use image::RgbImage;

use crate::mupdf::PdfDocument;

use super::error::{RasterError, RasterResult};
use super::types::{PageImage, SourceFormat};

/// Progress reported while an upload is rasterized
#[derive(Debug)]
pub enum RasterEvent {
    /// The upload parsed; `page_count` pages follow
    Opened { page_count: usize },
    Page(PageImage),
}

/// Rasterizer with a fixed output resolution
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    dpi: u32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DPI)
    }
}

impl Rasterizer {
    pub const DEFAULT_DPI: u32 = 200;

    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Rasterize an upload page by page
    ///
    /// `sink` returns `false` to stop early (the consumer went away). Blocking;
    /// callers on the async runtime should use `spawn_blocking`.
    pub fn stream<F>(&self, data: &[u8], file_name: &str, mut sink: F) -> RasterResult<()>
    where
        F: FnMut(RasterEvent) -> bool,
    {
        match SourceFormat::detect(file_name, data) {
            Some(SourceFormat::Pdf) => self.stream_pdf(data, &mut sink),
            Some(SourceFormat::Image(_)) => {
                let page = self.load_image(data, file_name)?;
                if sink(RasterEvent::Opened { page_count: 1 }) {
                    sink(RasterEvent::Page(page));
                }
                Ok(())
            }
            None => Err(RasterError::DocumentParse(format!(
                "'{}' is neither a PDF nor a supported image",
                file_name
            ))),
        }
    }

    fn stream_pdf<F>(&self, data: &[u8], sink: &mut F) -> RasterResult<()>
    where
        F: FnMut(RasterEvent) -> bool,
    {
        let doc = PdfDocument::from_bytes(data)?;

        if !sink(RasterEvent::Opened {
            page_count: doc.page_count(),
        }) {
            return Ok(());
        }

        for index in 0..doc.page_count() {
            let page = self.rasterize_page(&doc, index)?;
            if !sink(RasterEvent::Page(page)) {
                tracing::debug!(page = index, "Page consumer dropped, stopping");
                return Ok(());
            }
        }
        Ok(())
    }

    /// Collect every page of an upload
    #[cfg(test)]
    pub(crate) fn rasterize(&self, data: &[u8], file_name: &str) -> RasterResult<Vec<PageImage>> {
        let mut pages = Vec::new();
        self.stream(data, file_name, |event| {
            if let RasterEvent::Page(page) = event {
                pages.push(page);
            }
            true
        })?;
        Ok(pages)
    }

    fn rasterize_page(&self, doc: &PdfDocument, index: usize) -> RasterResult<PageImage> {
        let pixmap = doc.render_pixmap(index, self.dpi)?;

        let bitmap = samples_to_rgb(
            pixmap.width() as u32,
            pixmap.height() as u32,
            pixmap.n() as usize,
            pixmap.samples(),
        )?;
        let page = PageImage::from_pdf_page(index, self.dpi, bitmap);

        tracing::debug!(
            page = index,
            width = page.width(),
            height = page.height(),
            scale = page.scale(),
            "Rasterized page"
        );

        Ok(page)
    }

    fn load_image(&self, data: &[u8], file_name: &str) -> RasterResult<PageImage> {
        let img = image::load_from_memory(data).map_err(|e| {
            RasterError::DocumentParse(format!("failed to decode image '{}': {}", file_name, e))
        })?;

        Ok(PageImage::from_image_file(file_name, img.to_rgb8()))
    }
}

/// Convert interleaved pixmap samples (`n` components per pixel) to RGB
///
/// Gray pixmaps (`n == 1`, or `n == 2` with alpha) are expanded; any alpha
/// component is dropped since pages are rendered opaque.
fn samples_to_rgb(width: u32, height: u32, n: usize, samples: &[u8]) -> RasterResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(RasterError::Pixmap("empty pixmap".to_string()));
    }
    if n == 0 {
        return Err(RasterError::Pixmap("pixmap has no components".to_string()));
    }

    let pixel_count = width as usize * height as usize;
    if samples.len() < pixel_count * n {
        return Err(RasterError::Pixmap(format!(
            "expected {} samples, got {}",
            pixel_count * n,
            samples.len()
        )));
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for pixel in samples.chunks_exact(n).take(pixel_count) {
        match n {
            1 | 2 => rgb.extend_from_slice(&[pixel[0], pixel[0], pixel[0]]),
            _ => rgb.extend_from_slice(&pixel[..3]),
        }
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| RasterError::Pixmap("Failed to create image buffer".to_string()))
}
