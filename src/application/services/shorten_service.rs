//! Alias creation with collision resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::UrlStorage;
use crate::error::{AppError, StorageError};
use crate::utils::code_generator::{DIGEST_WIDTH, generate_code, validate_alias};

/// Tunables for alias creation.
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    /// Prefix of every short URL, e.g. `https://s.example.com`.
    pub base_url: String,
    /// Digest bytes used by the first automatic candidate.
    pub min_length: usize,
    pub custom_min_length: usize,
    pub custom_max_length: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://s.example.com".to_string(),
            min_length: 4,
            custom_min_length: 4,
            custom_max_length: 32,
        }
    }
}

/// Outcome of claiming one candidate short URL.
enum Claim {
    /// The key now maps to the requested URL (created here, or already so).
    Owned(ShortenedUrl),
    /// The key maps to a different URL.
    Taken,
}

/// Service that maps original URLs to collision-free short URLs.
///
/// Requests run independently; there is no lock around the check-then-write. The
/// storage's insert-if-absent on the short URL decides races, and every path returns
/// the row that the storage reports as owning the key, never the local candidate.
pub struct ShortenService<S: UrlStorage + ?Sized> {
    storage: Arc<S>,
    settings: ShortenerSettings,
}

impl<S: UrlStorage + ?Sized> ShortenService<S> {
    /// Creates a new shorten service.
    pub fn new(storage: Arc<S>, settings: ShortenerSettings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    /// Shortens `original` with a digest-derived code.
    ///
    /// # Code Growth
    ///
    /// Starts at `min_length` digest bytes. A candidate bound to a different URL is a
    /// collision and the next candidate uses one more byte, up to [`DIGEST_WIDTH`].
    /// A candidate already bound to `original` is returned unchanged, so re-shortening
    /// is idempotent and keeps the first writer's TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAvailable`] once every length up to the digest width collides.
    /// Returns [`AppError::Storage`] on backend failures, without retrying.
    pub async fn shorten(&self, original: &Url, ttl_seconds: i64) -> Result<ShortenedUrl, AppError> {
        let start = self.settings.min_length.clamp(1, DIGEST_WIDTH);

        for length in start..=DIGEST_WIDTH {
            let code = generate_code(original, length);
            let short = self.short_url_for(&code)?;

            match self.claim(original, short, ttl_seconds).await? {
                Claim::Owned(record) => return Ok(record),
                Claim::Taken => {
                    metrics::counter!("shorten_collisions_total").increment(1);
                    warn!(code = %code, length, "short code collision, growing");
                }
            }
        }

        metrics::counter!("shorten_exhausted_total").increment(1);
        Err(AppError::not_available(
            "No short code available for this URL",
            json!({ "url": original.as_str(), "max_length": DIGEST_WIDTH }),
        ))
    }

    /// Shortens `original` under a caller-chosen alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidAlias`] if the alias fails validation.
    /// Returns [`AppError::NotAvailable`] if the alias is bound to a different URL.
    /// Returns [`AppError::Storage`] on backend failures.
    pub async fn shorten_custom(
        &self,
        original: &Url,
        alias: &str,
        ttl_seconds: i64,
    ) -> Result<ShortenedUrl, AppError> {
        validate_alias(
            alias,
            self.settings.custom_min_length,
            self.settings.custom_max_length,
        )?;

        let short = self.short_url_for(alias)?;

        match self.claim(original, short, ttl_seconds).await? {
            Claim::Owned(record) => Ok(record),
            Claim::Taken => Err(AppError::not_available(
                "Custom alias is already taken",
                json!({ "alias": alias }),
            )),
        }
    }

    /// Builds the full short URL for a code.
    pub fn short_url_for(&self, code: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code);
        Url::parse(&raw).map_err(|e| {
            AppError::storage(
                "Configured base URL produced an invalid short URL",
                json!({ "short_url": raw, "reason": e.to_string() }),
            )
        })
    }

    /// Binds `short` to `original` unless it already belongs to another URL.
    ///
    /// A logically expired row still occupies its key.
    async fn claim(&self, original: &Url, short: Url, ttl_seconds: i64) -> Result<Claim, AppError> {
        match self.storage.get(short.as_str()).await {
            Ok(existing) if existing.original == *original => {
                debug!(short_url = %existing.short, "alias already maps to this URL");
                metrics::counter!("shorten_reused_total").increment(1);
                return Ok(Claim::Owned(existing));
            }
            Ok(_) => return Ok(Claim::Taken),
            Err(StorageError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let record = NewShortenedUrl::new(original.clone(), short, ttl_seconds);
        let owner = self.storage.put_if_absent(record).await?;

        if owner.original != *original {
            // lost the race to a concurrent writer with another URL
            return Ok(Claim::Taken);
        }

        info!(short_url = %owner.short, url = %owner.original, "short URL created");
        metrics::counter!("shorten_created_total").increment(1);
        Ok(Claim::Owned(owner))
    }
}
