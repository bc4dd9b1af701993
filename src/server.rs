//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, state wiring, and the Axum server lifecycle.

use crate::application::services::{ReportService, ShortenService};
use crate::config::Config;
use crate::domain::repositories::{DomainReportRepository, UrlStorage};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgDomainReportRepository, PgUrlRepository};
use crate::infrastructure::storage::TieredUrlStorage;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

const MAX_CONNECT_DELAY: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (retried with backoff)
/// - Migrations
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if the database stays unreachable, migrations fail, or the
/// listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(config.redis_url.as_deref()).await;

    let state = build_state(Arc::new(pool.clone()), cache, &config);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Opens the connection pool, retrying the first connection with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once `db_connect_retries` attempts have failed.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let pool = Retry::start(connect_backoff(config.db_connect_retries), || {
        let options = options.clone();
        async move {
            options
                .connect(&config.database_url)
                .await
                .inspect_err(|e| tracing::warn!("Database connection attempt failed: {}", e))
        }
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

/// Delays between connection attempts: exponential from 100 ms, jittered, capped at 5 s.
fn connect_backoff(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(MAX_CONNECT_DELAY)
        .map(jitter)
        .take(retries)
}

/// Connects Redis when configured, falling back to [`NullCache`].
pub async fn connect_cache(redis_url: Option<&str>) -> Arc<dyn CacheService> {
    let Some(redis_url) = redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Wires repositories, the storage facade and services into [`AppState`].
pub fn build_state(pool: Arc<PgPool>, cache: Arc<dyn CacheService>, config: &Config) -> AppState {
    let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
    let storage: Arc<dyn UrlStorage> = Arc::new(TieredUrlStorage::new(
        url_repository,
        cache.clone(),
        config.cache_ttl_policy(),
    ));
    let report_repository: Arc<dyn DomainReportRepository> =
        Arc::new(PgDomainReportRepository::new(pool));

    AppState {
        shortener: Arc::new(ShortenService::new(
            storage.clone(),
            config.shortener_settings(),
        )),
        storage,
        reports: Arc::new(ReportService::new(report_repository)),
        cache,
        default_ttl_seconds: config.default_ttl_seconds,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
