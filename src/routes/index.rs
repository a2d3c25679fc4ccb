//! Upload form

use axum::{response::Html, routing::get, Router};

use crate::html::index_page;
use crate::state::AppState;

/// GET /
pub async fn upload_form() -> Html<String> {
    Html(index_page())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(upload_form))
}
