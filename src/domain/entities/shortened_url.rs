//! Shortened URL entity and its persisted row shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::StorageError;

/// Longest lifetime a record can be given: 100 years. Longer requests are clamped.
pub const MAX_TTL_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// The canonical mapping between an original URL and its short alias.
///
/// `ttl_seconds` is the *remaining* lifetime when the record is read. It is recomputed from
/// the stored expiry on every read and never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    pub original: Url,
    pub short: Url,
    pub ttl_seconds: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    /// Returns true if the record has no remaining lifetime.
    pub fn is_expired(&self) -> bool {
        self.ttl_seconds <= 0
    }
}

/// Input for a write: `ttl_seconds` is the *requested* lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortenedUrl {
    pub original: Url,
    pub short: Url,
    pub ttl_seconds: i64,
}

impl NewShortenedUrl {
    pub fn new(original: Url, short: Url, ttl_seconds: i64) -> Self {
        Self {
            original,
            short,
            ttl_seconds: ttl_seconds.clamp(0, MAX_TTL_SECONDS),
        }
    }

    /// Builds the row to persist, stamping the absolute expiry as `now + ttl_seconds`.
    ///
    /// `created_at` here is provisional; the store assigns the real value.
    pub fn to_stored(&self, now: DateTime<Utc>) -> StoredUrl {
        StoredUrl {
            url: self.original.to_string(),
            short_url: self.short.to_string(),
            domain: domain_of(&self.original),
            expires_at: expiry_after(now, self.ttl_seconds),
            created_at: now,
        }
    }
}

/// A row of the `short_urls` table. Also the value cached in Redis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredUrl {
    pub url: String,
    pub short_url: String,
    pub domain: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl StoredUrl {
    /// Converts the row into a record, deriving the remaining TTL against `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if either stored URL fails to parse.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<ShortenedUrl, StorageError> {
        let original = Url::parse(&self.url)
            .map_err(|e| StorageError::Corrupt(format!("url '{}': {}", self.url, e)))?;
        let short = Url::parse(&self.short_url)
            .map_err(|e| StorageError::Corrupt(format!("short_url '{}': {}", self.short_url, e)))?;

        Ok(ShortenedUrl {
            original,
            short,
            ttl_seconds: remaining_ttl(self.expires_at, now),
            created_at: self.created_at,
        })
    }
}

/// Absolute expiry `ttl_seconds` after `now`, with the lifetime clamped to
/// `0..=MAX_TTL_SECONDS`. Saturates at the latest representable instant.
pub fn expiry_after(now: DateTime<Utc>, ttl_seconds: i64) -> DateTime<Utc> {
    chrono::Duration::try_seconds(ttl_seconds.clamp(0, MAX_TTL_SECONDS))
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Remaining whole seconds until `expires_at`, clamped at zero.
pub fn remaining_ttl(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expires_at - now).num_seconds().max(0)
}

/// Host of the URL, with the port appended when one is explicit.
pub fn domain_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
