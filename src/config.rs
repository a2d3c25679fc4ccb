//! Configuration management for the OCR overlay server
//!
//! Everything is read from the environment (after `.env` is loaded by
//! `dotenvy`). The OCR binary path lives here and is handed to the locator at
//! construction; nothing mutates it at runtime.

use std::env;

use crate::ocr::TesseractConfig;
use crate::raster::Rasterizer;

/// Lowest/highest rasterization DPI accepted from the environment
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 36..=600;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub render: RenderConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path override for the tesseract binary (`TESSERACT_CMD`)
    pub tesseract_cmd: String,
    pub language: String,
    /// Fragments below this confidence are dropped
    pub min_confidence: i32,
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub dpi: u32,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            ocr: OcrConfig {
                tesseract_cmd: "tesseract".to_string(),
                language: "eng".to_string(),
                min_confidence: 0,
            },
            render: RenderConfig {
                dpi: Rasterizer::DEFAULT_DPI,
            },
            upload: UploadConfig {
                max_bytes: 50 * 1024 * 1024,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let dpi = parse_or(&lookup, "RENDER_DPI", defaults.render.dpi)?;
        if !DPI_RANGE.contains(&dpi) {
            return Err(ConfigError::Invalid {
                var: "RENDER_DPI",
                value: dpi.to_string(),
                reason: format!(
                    "must be between {} and {}",
                    DPI_RANGE.start(),
                    DPI_RANGE.end()
                ),
            });
        }

        let max_bytes = parse_or(&lookup, "UPLOAD_MAX_BYTES", defaults.upload.max_bytes)?;
        if max_bytes == 0 {
            return Err(ConfigError::Invalid {
                var: "UPLOAD_MAX_BYTES",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_or(&lookup, "SERVER_PORT", defaults.server.port)?,
            },
            ocr: OcrConfig {
                tesseract_cmd: lookup("TESSERACT_CMD")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(defaults.ocr.tesseract_cmd),
                language: lookup("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                min_confidence: parse_or(&lookup, "OCR_MIN_CONFIDENCE", defaults.ocr.min_confidence)?,
            },
            render: RenderConfig { dpi },
            upload: UploadConfig { max_bytes },
        })
    }

    /// Locator settings derived from this configuration
    pub fn tesseract(&self) -> TesseractConfig {
        TesseractConfig {
            binary: self.ocr.tesseract_cmd.clone(),
            language: self.ocr.language.clone(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}
