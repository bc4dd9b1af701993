//! Two-tier storage facade: persistent store fronted by a cache.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, StoredUrl};
use crate::domain::repositories::{UrlRepository, UrlStorage};
use crate::error::StorageError;
use crate::infrastructure::cache::{CacheService, CacheTtlPolicy};

/// [`UrlStorage`] over a [`UrlRepository`] and a [`CacheService`].
///
/// # Read path
///
/// Cache first; on a miss the repository is read and, on a hit there, the row is cached
/// with a jittered lifetime from [`CacheTtlPolicy`].
///
/// # Write path
///
/// - [`UrlStorage::put`] inserts-or-ignores and invalidates the key, so the next read
///   observes whichever row the store kept.
/// - [`UrlStorage::put_if_absent`] returns the row owning the key and caches it.
///
/// The persistent store is authoritative. A cached row can outlive a later external
/// cleanup by at most its cache lifetime.
pub struct TieredUrlStorage<R: UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    cache_ttl: CacheTtlPolicy,
}

impl<R: UrlRepository> TieredUrlStorage<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, cache_ttl: CacheTtlPolicy) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    async fn populate_cache(&self, row: &StoredUrl) {
        let ttl = self.cache_ttl.sample();
        if let Err(e) = self.cache.set_record(row, ttl).await {
            warn!("Failed to cache {}: {}", row.short_url, e);
        }
    }
}

#[async_trait]
impl<R: UrlRepository> UrlStorage for TieredUrlStorage<R> {
    async fn get(&self, short_url: &str) -> Result<ShortenedUrl, StorageError> {
        match self.cache.get_record(short_url).await {
            Ok(Some(row)) => return row.into_record(Utc::now()),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {}: {}", short_url, e),
        }

        let row = self
            .repository
            .find_by_short_url(short_url)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.populate_cache(&row).await;

        row.into_record(Utc::now())
    }

    async fn put(&self, record: NewShortenedUrl) -> Result<(), StorageError> {
        let row = record.to_stored(Utc::now());
        let short_url = row.short_url.clone();

        let inserted = self.repository.insert_or_ignore(row).await?;
        if !inserted {
            debug!("Insert ignored, {} already stored", short_url);
        }

        if let Err(e) = self.cache.invalidate(&short_url).await {
            warn!("Failed to invalidate cache for {}: {}", short_url, e);
        }

        Ok(())
    }

    async fn put_if_absent(&self, record: NewShortenedUrl) -> Result<ShortenedUrl, StorageError> {
        let row = record.to_stored(Utc::now());
        let owner = self.repository.insert_if_absent(row).await?;

        self.populate_cache(&owner).await;

        owner.into_record(Utc::now())
    }

    async fn health_check(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}
