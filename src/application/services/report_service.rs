//! Top-domains report.

use std::sync::Arc;

use crate::domain::entities::DomainReportEntry;
use crate::domain::repositories::DomainReportRepository;
use crate::error::AppError;

/// Rows returned when the caller asks for zero or fewer.
pub const DEFAULT_REPORT_SIZE: i64 = 5;

/// Upper bound on rows in one report.
pub const MAX_REPORT_SIZE: i64 = 100;

/// Service reporting which domains have the most aliases.
pub struct ReportService<R: DomainReportRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: DomainReportRepository + ?Sized> ReportService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the `count` most common domains, highest count first.
    ///
    /// A `count` of zero or less yields [`DEFAULT_REPORT_SIZE`] rows; larger requests are
    /// capped at [`MAX_REPORT_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend failure.
    pub async fn top_domains(&self, count: i64) -> Result<Vec<DomainReportEntry>, AppError> {
        let limit = effective_limit(count);
        Ok(self.repository.top_domains(limit).await?)
    }
}

fn effective_limit(count: i64) -> i64 {
    if count <= 0 {
        DEFAULT_REPORT_SIZE
    } else {
        count.min(MAX_REPORT_SIZE)
    }
}
