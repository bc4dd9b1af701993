//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::StoredUrl;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Redis cache of alias rows, stored as JSON under `url:{short_url}`.
///
/// Uses a `ConnectionManager` for connection reuse and reconnects. All operations are
/// fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_url: &str) -> String {
        format!("{}{}", self.key_prefix, short_url)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_record(&self, short_url: &str) -> CacheResult<Option<StoredUrl>> {
        let key = self.build_key(short_url);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(payload)) => match serde_json::from_str::<StoredUrl>(&payload) {
                Ok(row) => {
                    debug!("Cache HIT: {}", short_url);
                    Ok(Some(row))
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", short_url, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", short_url);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", short_url, e);
                Ok(None)
            }
        }
    }

    async fn set_record(&self, row: &StoredUrl, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(&row.short_url);
        let payload = serde_json::to_string(row)
            .map_err(|e| CacheError::OperationError(format!("serialize {}: {}", key, e)))?;
        let ttl_seconds = ttl.as_secs().max(1);
        let mut conn = self.client.clone();

        match conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", row.short_url, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", row.short_url, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, short_url: &str) -> CacheResult<()> {
        let key = self.build_key(short_url);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", short_url);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", short_url, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
