//! The storage facade consumed by the resolver and the HTTP layer.

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl};
use crate::error::StorageError;
use async_trait::async_trait;

/// Uniform interface over the persistent store and an optional cache.
///
/// Reads derive `ttl_seconds` from the stored expiry each time. Writes never touch an
/// existing row.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::TieredUrlStorage`] - PostgreSQL fronted by a cache
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStorage: Send + Sync {
    /// Looks up the physical record for `short_url`, including logically expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no row exists for the key.
    async fn get(&self, short_url: &str) -> Result<ShortenedUrl, StorageError>;

    /// Resolves `short_url` for redirecting callers.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when the row is absent or has no remaining TTL.
    async fn resolve(&self, short_url: &str) -> Result<ShortenedUrl, StorageError> {
        let record = self.get(short_url).await?;
        if record.is_expired() {
            return Err(StorageError::NotFound);
        }
        Ok(record)
    }

    /// Persists the record with insert-or-ignore semantics.
    ///
    /// A duplicate key is a silent no-op; the existing row is never modified.
    async fn put(&self, record: NewShortenedUrl) -> Result<(), StorageError>;

    /// Atomically inserts the record if its key is free, returning the row that owns the
    /// key afterwards. The returned record may belong to a concurrent writer.
    async fn put_if_absent(&self, record: NewShortenedUrl) -> Result<ShortenedUrl, StorageError> {
        let short_url = record.short.to_string();
        self.put(record).await?;
        self.get(&short_url).await
    }

    /// Reports whether the persistent tier is reachable.
    async fn health_check(&self) -> bool;
}
