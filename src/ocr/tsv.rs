//! Tesseract TSV output parsing
//!
//! `tesseract ... tsv` prints one row per layout element (page, block,
//! paragraph, line, word). Only word rows carry text; the others report
//! confidence -1. Every row is returned so filtering stays downstream.

use super::types::{OcrError, TextFragment};

const COLUMNS: [&str; 6] = ["left", "top", "width", "height", "conf", "text"];

/// Parse TSV output into fragments, preserving row order
pub fn parse_tsv(output: &str) -> Result<Vec<TextFragment>, OcrError> {
    let mut lines = output.lines();

    let header = match lines.next() {
        Some(header) if !header.trim().is_empty() => header,
        _ => return Ok(Vec::new()),
    };

    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let mut index = [0usize; 6];
    for (slot, name) in index.iter_mut().zip(COLUMNS) {
        *slot = columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| OcrError::MalformedOutput(format!("missing '{}' column", name)))?;
    }
    let [left, top, width, height, conf, text] = index;

    let mut fragments = Vec::new();
    for (row_number, row) in lines.enumerate() {
        if row.is_empty() {
            continue;
        }
        let cells: Vec<&str> = row.split('\t').collect();

        let int_cell = |column: usize, name: &str| -> Result<i32, OcrError> {
            cells
                .get(column)
                .and_then(|v| v.trim().parse::<i32>().ok())
                .ok_or_else(|| {
                    OcrError::MalformedOutput(format!("row {}: bad '{}' value", row_number + 2, name))
                })
        };

        // Tesseract 4+ reports fractional confidences ("96.063751")
        let confidence = cells
            .get(conf)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map(|c| c.round() as i32)
            .ok_or_else(|| {
                OcrError::MalformedOutput(format!("row {}: bad 'conf' value", row_number + 2))
            })?;

        fragments.push(TextFragment {
            text: cells.get(text).copied().unwrap_or("").to_string(),
            left: int_cell(left, "left")?,
            top: int_cell(top, "top")?,
            width: int_cell(width, "width")?,
            height: int_cell(height, "height")?,
            confidence,
        });
    }

    Ok(fragments)
}
