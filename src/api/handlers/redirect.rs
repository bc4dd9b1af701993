//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The code is joined to the configured base URL and resolved through the storage
/// facade, which reads the cache before the database.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or its lifetime has run out.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let short = state.shortener.short_url_for(&code)?;

    let record = state.storage.resolve(short.as_str()).await?;
    debug!(short_url = %record.short, ttl = record.ttl_seconds, "redirecting");

    Ok(Redirect::temporary(record.original.as_str()))
}
