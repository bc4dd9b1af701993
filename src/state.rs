//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{ReportService, ShortenService};
use crate::domain::repositories::{DomainReportRepository, UrlStorage};
use crate::infrastructure::cache::CacheService;

/// Handles owned by the router. Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenService<dyn UrlStorage>>,
    pub storage: Arc<dyn UrlStorage>,
    pub reports: Arc<ReportService<dyn DomainReportRepository>>,
    pub cache: Arc<dyn CacheService>,
    /// Lifetime applied when a request carries no `expires`.
    pub default_ttl_seconds: i64,
}
