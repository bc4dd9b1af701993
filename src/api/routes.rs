//! API route configuration.

use crate::api::handlers::{report_handler, shorten_custom_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortening and reporting routes.
///
/// # Endpoints
///
/// - `POST /shorten`         - Digest-derived alias
/// - `POST /shorten/custom`  - Caller-chosen alias
/// - `GET  /report/{count}`  - Top domains by alias count
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/custom", post(shorten_custom_handler))
        .route("/report/{count}", get(report_handler))
}
