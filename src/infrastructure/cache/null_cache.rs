//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::StoredUrl;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every read is a miss,
/// so the storage facade always falls through to the persistent store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_record(&self, _short_url: &str) -> CacheResult<Option<StoredUrl>> {
        Ok(None)
    }

    async fn set_record(&self, _row: &StoredUrl, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _short_url: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
