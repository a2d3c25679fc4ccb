//! Request-scoped PDF document handle
//!
//! Validates the buffer up front (header, parse, page count) so every later
//! call only has to deal with per-page failures.

use mupdf::{Colorspace, Document, Matrix, Pixmap};

use crate::raster::{RasterError, RasterResult, SourceFormat, POINTS_PER_INCH};

/// MIME hint handed to MuPDF when opening from memory
const PDF_MIME: &str = "application/pdf";

/// An opened PDF with its page count cached
pub struct PdfDocument {
    doc: Document,
    page_count: usize,
}

impl PdfDocument {
    /// Open a PDF from an in-memory buffer
    ///
    /// Fails with `DocumentParse` when the header is missing, MuPDF cannot
    /// parse the structure, or the document has no pages.
    pub fn from_bytes(data: &[u8]) -> RasterResult<Self> {
        if SourceFormat::from_magic_bytes(data) != Some(SourceFormat::Pdf) {
            return Err(RasterError::DocumentParse(
                "missing %PDF header".to_string(),
            ));
        }

        let doc = Document::from_bytes(data, PDF_MIME)
            .map_err(|e| RasterError::DocumentParse(e.to_string()))?;

        let page_count = doc
            .page_count()
            .map_err(|e| RasterError::DocumentParse(e.to_string()))?;

        if page_count <= 0 {
            return Err(RasterError::DocumentParse(
                "document has no pages".to_string(),
            ));
        }

        Ok(Self {
            doc,
            page_count: page_count as usize,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn check_index(&self, index: usize) -> RasterResult<()> {
        if index >= self.page_count {
            return Err(RasterError::PageIndex {
                index,
                page_count: self.page_count,
            });
        }
        Ok(())
    }

    /// Render one page to an opaque RGB pixmap at `dpi`
    pub fn render_pixmap(&self, index: usize, dpi: u32) -> RasterResult<Pixmap> {
        self.check_index(index)?;

        let page = self
            .doc
            .load_page(index as i32)
            .map_err(|e| RasterError::DocumentParse(e.to_string()))?;

        let scale = dpi as f32 / POINTS_PER_INCH;
        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();

        page.to_pixmap(&matrix, &colorspace, false, true)
            .map_err(|e| RasterError::Pixmap(e.to_string()))
    }
}
