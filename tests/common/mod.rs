#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use digestlink::application::services::{ReportService, ShortenService, ShortenerSettings};
use digestlink::domain::entities::{
    DomainReportEntry, NewShortenedUrl, ShortenedUrl, StoredUrl, domain_of,
};
use digestlink::domain::repositories::{DomainReportRepository, UrlStorage};
use digestlink::error::StorageError;
use digestlink::infrastructure::cache::NullCache;
use digestlink::state::AppState;
use url::Url;

pub const BASE_URL: &str = "https://s.test.com";

/// `UrlStorage` backed by a map; the map lock gives the same atomicity as the
/// database's insert-if-absent.
#[derive(Default)]
pub struct InMemoryStorage {
    rows: Mutex<HashMap<String, StoredUrl>>,
    unavailable: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a row directly, bypassing insert-or-ignore.
    pub fn seed(&self, original: &str, short_url: &str, ttl_secs: i64) {
        let now = Utc::now();
        let original = Url::parse(original).unwrap();
        let row = StoredUrl {
            url: original.to_string(),
            short_url: short_url.to_string(),
            domain: domain_of(&original),
            expires_at: now + Duration::seconds(ttl_secs),
            created_at: now,
        };
        self.rows.lock().unwrap().insert(row.short_url.clone(), row);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlStorage for InMemoryStorage {
    async fn get(&self, short_url: &str) -> Result<ShortenedUrl, StorageError> {
        self.check_available()?;
        let row = self
            .rows
            .lock()
            .unwrap()
            .get(short_url)
            .cloned()
            .ok_or(StorageError::NotFound)?;
        row.into_record(Utc::now())
    }

    async fn put(&self, record: NewShortenedUrl) -> Result<(), StorageError> {
        self.check_available()?;
        let row = record.to_stored(Utc::now());
        self.rows
            .lock()
            .unwrap()
            .entry(row.short_url.clone())
            .or_insert(row);
        Ok(())
    }

    async fn put_if_absent(&self, record: NewShortenedUrl) -> Result<ShortenedUrl, StorageError> {
        self.check_available()?;
        let row = record.to_stored(Utc::now());
        let owner = self
            .rows
            .lock()
            .unwrap()
            .entry(row.short_url.clone())
            .or_insert(row)
            .clone();
        owner.into_record(Utc::now())
    }

    async fn health_check(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

/// Report source returning a fixed, pre-sorted list.
pub struct FixedReport(pub Vec<DomainReportEntry>);

#[async_trait]
impl DomainReportRepository for FixedReport {
    async fn top_domains(&self, limit: i64) -> Result<Vec<DomainReportEntry>, StorageError> {
        Ok(self.0.iter().take(limit as usize).cloned().collect())
    }
}

pub fn settings() -> ShortenerSettings {
    ShortenerSettings {
        base_url: BASE_URL.to_string(),
        min_length: 4,
        custom_min_length: 4,
        custom_max_length: 16,
    }
}

pub fn create_test_state(storage: Arc<InMemoryStorage>, report: Vec<DomainReportEntry>) -> AppState {
    let storage: Arc<dyn UrlStorage> = storage;
    let reports: Arc<dyn DomainReportRepository> = Arc::new(FixedReport(report));

    AppState {
        shortener: Arc::new(ShortenService::new(storage.clone(), settings())),
        storage,
        reports: Arc::new(ReportService::new(reports)),
        cache: Arc::new(NullCache::new()),
        default_ttl_seconds: 3600,
    }
}

pub fn entry(domain: &str, count: i64) -> DomainReportEntry {
    DomainReportEntry {
        domain: domain.to_string(),
        count,
    }
}
