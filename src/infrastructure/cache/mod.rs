//! Caching tier in front of the persistent store.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`CacheTtlPolicy`] decides how long each populated entry lives.

mod null_cache;
mod redis_cache;
mod service;
mod ttl_policy;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
pub use ttl_policy::CacheTtlPolicy;

#[cfg(test)]
pub use service::MockCacheService;
