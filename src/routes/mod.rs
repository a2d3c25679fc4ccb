//! Route modules for the OCR overlay server

pub mod health;
pub mod index;
pub mod upload;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let max_upload = state.config().upload.max_bytes;

    Router::new()
        .merge(index::router())
        .merge(upload::router())
        .nest("/health", health::router())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
