//! Repository trait for the top-domains report.

use crate::domain::entities::DomainReportEntry;
use crate::error::StorageError;
use async_trait::async_trait;

/// Read-only aggregate over stored aliases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainReportRepository: Send + Sync {
    /// Returns up to `limit` domains ordered by alias count, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on backend failure.
    async fn top_domains(&self, limit: i64) -> Result<Vec<DomainReportEntry>, StorageError>;
}
