//! Overlay rendering
//!
//! Each page becomes a positioned canvas: the bitmap is embedded as a base64
//! PNG at its native pixel size and every fragment becomes an absolutely
//! positioned box in that same pixel space. No CSS scaling is applied, so a
//! box at (left, top) lands exactly where the engine reported it.

use std::io::Cursor;

use base64::Engine;
use html_escape::{encode_double_quoted_attribute, encode_text};
use image::RgbImage;

use crate::ocr::TextFragment;
use crate::raster::PageImage;

/// Renderer errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to decode embedded image: {0}")]
    Decode(String),
}

/// Encode a bitmap as base64 PNG text
pub fn encode_png_base64(bitmap: &RgbImage) -> Result<String, RenderError> {
    let mut buffer = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(buffer))
}

/// Inverse of `encode_png_base64`
#[cfg(test)]
pub(crate) fn decode_png_base64(data: &str) -> Result<RgbImage, RenderError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| RenderError::Decode(e.to_string()))?;
    let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .map_err(|e| RenderError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Render one page section: embedded image plus one box per fragment
pub fn render_page(page: &PageImage, fragments: &[TextFragment]) -> Result<String, RenderError> {
    let (width, height) = (page.width(), page.height());
    let encoded = encode_png_base64(&page.bitmap)?;

    let mut html = String::with_capacity(encoded.len() + fragments.len() * 256 + 512);
    html.push_str(&format!(
        "<section class=\"page\" data-page-index=\"{}\">\n",
        page.index
    ));
    html.push_str(&format!(
        "<h2 class=\"page-label\">{} <small>{} &times; {} px &middot; {} boxes</small></h2>\n",
        encode_text(&page.label),
        width,
        height,
        fragments.len()
    ));
    html.push_str("<div class=\"page-scroll\">\n");
    html.push_str(&format!(
        "<div class=\"page-canvas\" style=\"width:{w}px;height:{h}px;\">\n",
        w = width,
        h = height
    ));
    html.push_str(&format!(
        "<img class=\"page-image\" src=\"data:image/png;base64,{}\" width=\"{}\" height=\"{}\" alt=\"{}\">\n",
        encoded,
        width,
        height,
        encode_double_quoted_attribute(&page.label)
    ));
    for fragment in fragments {
        html.push_str(&render_box(fragment));
    }
    html.push_str("</div>\n</div>\n</section>\n");

    Ok(html)
}

fn render_box(fragment: &TextFragment) -> String {
    format!(
        "<div class=\"ocr-box\" style=\"left:{}px;top:{}px;width:{}px;height:{}px;\" data-conf=\"{}\" data-right=\"{}\" data-bottom=\"{}\" title=\"{} ({})\"><span class=\"ocr-label\">{}</span></div>\n",
        fragment.left,
        fragment.top,
        fragment.width,
        fragment.height,
        fragment.confidence,
        fragment.right(),
        fragment.bottom(),
        encode_double_quoted_attribute(&fragment.text),
        fragment.confidence,
        encode_text(&fragment.text),
    )
}
