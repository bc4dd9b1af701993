//! PostgreSQL implementation of the top-domains report.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::DomainReportEntry;
use crate::domain::repositories::DomainReportRepository;
use crate::error::StorageError;

/// Aggregates `short_urls` by the `domain` column (indexed).
pub struct PgDomainReportRepository {
    pool: Arc<PgPool>,
}

impl PgDomainReportRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainReportRepository for PgDomainReportRepository {
    async fn top_domains(&self, limit: i64) -> Result<Vec<DomainReportEntry>, StorageError> {
        let rows = sqlx::query_as::<_, DomainReportEntry>(
            r#"
            SELECT domain, COUNT(*) AS count
            FROM short_urls
            GROUP BY domain
            ORDER BY count DESC, domain ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
