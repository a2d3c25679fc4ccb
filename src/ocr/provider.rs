//! Text locators
//!
//! `TextLocator` is the seam between the pipeline and an OCR engine. The
//! shipped implementation drives the Tesseract CLI: the page is piped in as
//! PNG on stdin and word boxes come back as TSV on stdout, so no temp files
//! are written.

use std::io::Cursor;
use std::process::Stdio;

use async_trait::async_trait;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::raster::PageImage;

use super::tsv::parse_tsv;
use super::types::{OcrError, TextFragment};

/// OCR engine trait
#[async_trait]
pub trait TextLocator: Send + Sync {
    /// Short engine name for logs and error pages
    fn engine_name(&self) -> &str;

    /// Check if the engine can be invoked
    async fn is_available(&self) -> bool;

    /// Recognize every text region on a page, unfiltered, in engine order
    async fn locate(&self, page: &PageImage) -> Result<Vec<TextFragment>, OcrError>;
}

/// Tesseract invocation settings
#[derive(Debug, Clone)]
pub struct TesseractConfig {
    /// Path to the tesseract executable (default: "tesseract" - uses PATH)
    pub binary: String,
    /// Language code(s), e.g. "eng" or "eng+deu"
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// Tesseract CLI locator
pub struct TesseractLocator {
    config: TesseractConfig,
}

impl TesseractLocator {
    /// Create a locator, rejecting language codes that could smuggle arguments
    pub fn new(config: TesseractConfig) -> Result<Self, OcrError> {
        validate_language(&config.language)?;
        Ok(Self { config })
    }

    /// Get the engine version line (first line of `--version`)
    pub async fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.config.binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            return Err(OcrError::EngineUnavailable(format!(
                "`{} --version` exited with {}",
                self.config.binary, output.status
            )));
        }

        // Older releases print the banner on stderr
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&text)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    fn unavailable(&self, err: std::io::Error) -> OcrError {
        OcrError::EngineUnavailable(format!(
            "failed to run `{}`: {}",
            self.config.binary, err
        ))
    }

    fn command(&self, dpi: Option<u32>) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg("stdin").arg("stdout");
        cmd.arg("-l").arg(&self.config.language);
        if let Some(dpi) = dpi {
            cmd.arg("--dpi").arg(dpi.to_string());
        }
        cmd.arg("tsv");

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl TextLocator for TesseractLocator {
    fn engine_name(&self) -> &str {
        "tesseract"
    }

    async fn is_available(&self) -> bool {
        let result = Command::new(&self.config.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        matches!(result, Ok(status) if status.success())
    }

    async fn locate(&self, page: &PageImage) -> Result<Vec<TextFragment>, OcrError> {
        if page.width() == 0 || page.height() == 0 {
            return Err(OcrError::InvalidImage(format!(
                "{} has zero size",
                page.label
            )));
        }

        let bitmap = page.bitmap.clone();
        let png = tokio::task::spawn_blocking(move || encode_png_fast(&bitmap))
            .await
            .map_err(|e| OcrError::InvalidImage(format!("Task join error: {}", e)))??;

        let mut child = self.command(page.dpi).spawn().map_err(|e| self.unavailable(e))?;

        // Write image to stdin, then close it to signal end of input
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&png).await {
                let _ = child.kill().await;
                return Err(OcrError::EngineUnavailable(format!(
                    "failed to write to `{}` stdin: {}",
                    self.config.binary, e
                )));
            }
            if let Err(e) = stdin.flush().await {
                let _ = child.kill().await;
                return Err(OcrError::Io(e));
            }
            drop(stdin);
        }

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineUnavailable(format!(
                "`{}` exited with {}: {}",
                self.config.binary,
                output.status,
                stderr.trim()
            )));
        }

        let fragments = parse_tsv(&String::from_utf8_lossy(&output.stdout))?;

        tracing::debug!(
            page = page.index,
            fragments = fragments.len(),
            "Tesseract finished"
        );

        Ok(fragments)
    }
}

/// Validate language code to prevent argument injection
///
/// Language codes are alphanumeric with optional underscore/plus
/// (e.g. "eng", "eng+deu", "chi_sim").
fn validate_language(lang: &str) -> Result<(), OcrError> {
    if lang.is_empty() || lang.len() > 64 {
        return Err(OcrError::InvalidLanguage(format!(
            "invalid length: {:?}",
            lang
        )));
    }
    if let Some(c) = lang
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '+' && *c != '_')
    {
        return Err(OcrError::InvalidLanguage(format!(
            "invalid character {:?} in {:?}",
            c, lang
        )));
    }
    Ok(())
}

/// PNG for the engine: speed over size, the bytes never leave the host
fn encode_png_fast(bitmap: &image::RgbImage) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut buffer),
        CompressionType::Fast,
        FilterType::NoFilter,
    );
    bitmap
        .write_with_encoder(encoder)
        .map_err(|e| OcrError::InvalidImage(format!("Failed to encode page: {}", e)))?;
    Ok(buffer)
}
