//! Handlers for the shortening endpoints.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde_json::json;
use url::Url;
use validator::Validate;

use crate::api::dto::shorten::{CustomShortenRequest, ShortenRequest, ShortenedUrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::normalize_url;

/// Shortens a URL with a digest-derived code.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page", "expires": "2030-01-01T00:00:00Z" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "short_url": "https://s.example.com/4Fz1kQ",
///   "ttl_in_seconds": 86400,
///   "created_at": "2029-12-31T00:00:00Z"
/// }
/// ```
///
/// Shortening the same URL again returns the existing alias.
///
/// # Errors
///
/// - 400 for an invalid URL or an expiry in the past
/// - 409 when every code length collides
/// - 500 on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenedUrlResponse>, AppError> {
    payload.validate()?;

    let original = parse_original(&payload.url)?;
    let ttl = requested_ttl(payload.expires, state.default_ttl_seconds, Utc::now())?;

    let record = state.shortener.shorten(&original, ttl).await?;

    Ok(Json(record.into()))
}

/// Shortens a URL under a caller-chosen alias.
///
/// # Endpoint
///
/// `POST /shorten/custom`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "custom_code": "promo2030" }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL, alias or expiry
/// - 409 when the alias belongs to a different URL
/// - 500 on storage failure
pub async fn shorten_custom_handler(
    State(state): State<AppState>,
    Json(payload): Json<CustomShortenRequest>,
) -> Result<Json<ShortenedUrlResponse>, AppError> {
    payload.validate()?;

    let original = parse_original(&payload.url)?;
    let ttl = requested_ttl(payload.expires, state.default_ttl_seconds, Utc::now())?;

    let record = state
        .shortener
        .shorten_custom(&original, &payload.custom_code, ttl)
        .await?;

    Ok(Json(record.into()))
}

fn parse_original(raw: &str) -> Result<Url, AppError> {
    normalize_url(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })
}

/// Seconds until `expires`, or `default_ttl` when none was given.
fn requested_ttl(
    expires: Option<DateTime<Utc>>,
    default_ttl: i64,
    now: DateTime<Utc>,
) -> Result<i64, AppError> {
    let Some(expires) = expires else {
        return Ok(default_ttl);
    };

    let ttl = (expires - now).num_seconds();
    if ttl <= 0 {
        return Err(AppError::bad_request(
            "Expiry must be in the future",
            json!({ "expires": expires }),
        ));
    }

    Ok(ttl)
}
