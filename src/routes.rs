//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`, `POST /shorten/custom`, `GET /report/{count}` - see [`crate::api::routes`]
//! - `GET  /health`  - Database and cache checks
//! - `GET  /{code}`  - Short link redirect
//!
//! Static routes take precedence over the `/{code}` capture, so `health` and `report`
//! are never treated as codes.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and tracing without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::api_routes())
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
