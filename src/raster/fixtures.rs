//! PDF builders for tests and benches
//!
//! Produces small but well-formed PDFs (correct xref offsets) so MuPDF never
//! has to fall back to repair mode. Compiled for unit tests and behind the
//! `test-util` feature.

/// Build a PDF with one page per `(width_pt, height_pt, content_stream)`
///
/// Every page gets Helvetica as `/F1`, so content streams may draw text.
pub fn build_pdf(pages: &[(f32, f32, &str)]) -> Vec<u8> {
    let page_count = pages.len();
    // 1: catalog, 2: pages, 3: font, then (page, contents) pairs
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, (width, height, content)) in pages.iter().enumerate() {
        let contents_id = 5 + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
            width, height, contents_id
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

/// Single blank US Letter page
pub fn blank_pdf() -> Vec<u8> {
    build_pdf(&[(612.0, 792.0, "")])
}

/// Single US Letter page with large "HELLO" near the top left
pub fn hello_pdf() -> Vec<u8> {
    build_pdf(&[(612.0, 792.0, "BT /F1 72 Tf 72 650 Td (HELLO) Tj ET")])
}
