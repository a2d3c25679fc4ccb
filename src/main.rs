//! OCR Overlay Server
//!
//! Upload a PDF and inspect the OCR boxes drawn over each rendered page.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocr_overlay_server::config::Config;
use ocr_overlay_server::routes;
use ocr_overlay_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "ocr_overlay_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting OCR Overlay Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Tesseract binary: {}", config.ocr.tesseract_cmd);
    tracing::info!("Render DPI: {}", config.render.dpi);

    let app_state = AppState::new(config.clone()).context("Failed to initialize application state")?;

    // Probe the OCR engine; uploads fail with 503 until it is installed
    let tesseract = ocr_overlay_server::ocr::TesseractLocator::new(config.tesseract())?;
    match tesseract.version().await {
        Ok(version) => tracing::info!("OCR engine: {}", version),
        Err(e) => tracing::warn!("{}. Uploads will fail until TESSERACT_CMD is fixed", e),
    }

    let app = routes::router(app_state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.server.host, config.server.port))?;
    tracing::info!("OCR Overlay Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
