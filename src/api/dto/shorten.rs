//! DTOs for the shortening endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortenedUrl;

/// Request to shorten a URL with a digest-derived code.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Original URL; a missing scheme is treated as `https`.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional absolute expiry. Defaults to the configured lifetime.
    pub expires: Option<DateTime<Utc>>,
}

/// Request to shorten a URL under a caller-chosen alias.
///
/// Alias rules are enforced by the service so they follow the configured bounds.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    pub custom_code: String,

    pub expires: Option<DateTime<Utc>>,
}

/// A created or existing alias.
#[derive(Debug, Serialize)]
pub struct ShortenedUrlResponse {
    pub url: String,
    pub short_url: String,
    pub ttl_in_seconds: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ShortenedUrl> for ShortenedUrlResponse {
    fn from(record: ShortenedUrl) -> Self {
        Self {
            url: record.original.into(),
            short_url: record.short.into(),
            ttl_in_seconds: record.ttl_seconds,
            created_at: record.created_at,
        }
    }
}
