//! Page image types
//!
//! A `PageImage` is the bitmap every later stage works against: OCR boxes are
//! reported in its pixel space and the renderer embeds it at native size.

use std::path::Path;

use image::{ImageFormat, RgbImage};

/// PDF user space is measured in points, 72 per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Kind of upload, detected from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    Image(ImageFormat),
}

impl SourceFormat {
    /// Detect the upload kind from its leading bytes
    ///
    /// PDF readers accept a header anywhere in the first 1024 bytes, so the
    /// `%PDF-` marker is searched for rather than required at offset 0.
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        let window = &bytes[..bytes.len().min(1024)];
        if window.windows(5).any(|w| w == b"%PDF-") {
            return Some(Self::Pdf);
        }

        image::guess_format(bytes).ok().map(Self::Image)
    }

    /// Pick the decode path for an upload
    ///
    /// A `.pdf` name always takes the PDF path, so whatever else hides behind
    /// that name is rejected as an unreadable document.
    pub fn detect(file_name: &str, bytes: &[u8]) -> Option<Self> {
        if has_pdf_extension(file_name) {
            return Some(Self::Pdf);
        }
        Self::from_magic_bytes(bytes)
    }
}

fn has_pdf_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

/// One rasterized page
#[derive(Debug, Clone)]
pub struct PageImage {
    /// Zero-based page index within the upload
    pub index: usize,
    /// Display label ("Page 3", "Image File: scan.png")
    pub label: String,
    /// Resolution the page was rendered at; `None` for direct image uploads
    pub dpi: Option<u32>,
    /// Opaque RGB bitmap
    pub bitmap: RgbImage,
}

impl PageImage {
    /// Build a page rendered from a PDF at the given DPI
    pub fn from_pdf_page(index: usize, dpi: u32, bitmap: RgbImage) -> Self {
        Self {
            index,
            label: format!("Page {}", index + 1),
            dpi: Some(dpi),
            bitmap,
        }
    }

    /// Build a page from an uploaded raster image
    pub fn from_image_file(file_name: &str, bitmap: RgbImage) -> Self {
        Self {
            index: 0,
            label: format!("Image File: {}", file_name),
            dpi: None,
            bitmap,
        }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Pixels per PDF point (DPI / 72); 1.0 when no DPI is known
    pub fn scale(&self) -> f32 {
        self.dpi
            .map(|dpi| dpi as f32 / POINTS_PER_INCH)
            .unwrap_or(1.0)
    }
}
