//! Cache service trait and error types.

use crate::domain::entities::StoredUrl;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of persisted alias rows keyed by short URL.
///
/// Entries hold the row with its absolute expiry, so readers derive the remaining TTL
/// themselves. An entry's own cache lifetime is independent of that expiry.
///
/// Implementations must be thread-safe and fail open: a backend failure degrades to a
/// miss (or a skipped write), never to an error surfaced to the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached row for `short_url`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(row))` on cache hit
    /// - `Ok(None)` on cache miss or backend error
    async fn get_record(&self, short_url: &str) -> CacheResult<Option<StoredUrl>>;

    /// Stores `row` under its short URL for `ttl`.
    async fn set_record(&self, row: &StoredUrl, ttl: Duration) -> CacheResult<()>;

    /// Removes the cached entry for `short_url`. A missing key is not an error.
    async fn invalidate(&self, short_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
