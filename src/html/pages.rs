//! Page shells
//!
//! Static chrome around the rendered output: the upload form, the results
//! wrapper and the error page. Everything interpolated here is escaped.

use axum::http::StatusCode;
use html_escape::encode_text;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #1d1d1f; background: #fafafa; }
h1 { font-size: 1.4rem; }
form.upload { display: flex; gap: 0.75rem; align-items: center; padding: 1rem; border: 1px solid #ddd; background: #fff; }
.summary { color: #555; }
.error { border-left: 4px solid #c62828; padding: 0.75rem 1rem; background: #fff; }
.error .status { color: #c62828; font-weight: 600; }
.page { margin: 2rem 0; }
.page-label small { color: #777; font-weight: normal; }
.page-scroll { overflow: auto; border: 1px solid #ccc; background: #fff; }
.page-canvas { position: relative; }
.page-image { position: absolute; left: 0; top: 0; display: block; max-width: none; }
.ocr-box { position: absolute; box-sizing: border-box; border: 1px solid rgba(220, 20, 60, 0.9); background: rgba(220, 20, 60, 0.08); }
.ocr-box:hover { background: rgba(220, 20, 60, 0.25); z-index: 1; }
.ocr-label { position: absolute; left: 0; bottom: 100%; font-size: 11px; line-height: 1; white-space: nowrap; padding: 1px 2px; color: #fff; background: rgba(220, 20, 60, 0.85); }
"#;

/// Wrap a body in the shared document shell
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = encode_text(title),
        body = body,
    )
}

fn upload_form() -> &'static str {
    concat!(
        "<form class=\"upload\" action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n",
        "<input type=\"file\" name=\"file\" accept=\"application/pdf,image/*\" required>\n",
        "<button type=\"submit\">Run OCR</button>\n",
        "</form>\n"
    )
}

/// GET / body
pub fn index_page() -> String {
    layout(
        "PDF OCR Overlay",
        &format!(
            "<p>Upload a PDF (or a page image) to see every recognized word boxed on top of the page.</p>\n{}",
            upload_form()
        ),
    )
}

/// Results shell around already rendered page sections
pub fn results_page(file_name: &str, page_count: usize, box_count: usize, pages_html: &str) -> String {
    let summary = format!(
        "<p class=\"summary\">{} &middot; {} page{} &middot; {} box{}</p>\n",
        encode_text(file_name),
        page_count,
        if page_count == 1 { "" } else { "s" },
        box_count,
        if box_count == 1 { "" } else { "es" },
    );
    layout(
        "PDF OCR Overlay",
        &format!("{}{}{}", upload_form(), summary, pages_html),
    )
}

/// Error page with status and message; never embeds page images
pub fn error_page(status: StatusCode, title: &str, message: &str) -> String {
    let body = format!(
        "<div class=\"error\">\n<p class=\"status\">{} {}</p>\n<p class=\"message\">{}</p>\n</div>\n<p><a href=\"/\">Try another file</a></p>\n{}",
        status.as_u16(),
        encode_text(title),
        encode_text(message),
        upload_form(),
    );
    layout("PDF OCR Overlay", &body)
}
