//! Health check endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when uploads would fail with 503
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub ocr: OcrStatus,
}

#[derive(Serialize)]
pub struct OcrStatus {
    pub engine: String,
    pub available: bool,
    pub dpi: u32,
    pub min_confidence: i32,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = state.pipeline();
    let available = pipeline.locator().is_available().await;

    Json(HealthResponse {
        status: if available { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        service: "ocr-overlay-server",
        ocr: OcrStatus {
            engine: pipeline.locator().engine_name().to_string(),
            available,
            dpi: pipeline.rasterizer().dpi(),
            min_confidence: pipeline.filter().min_confidence(),
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
