//! Aggregated domain counts for the top-domains report.

use serde::Serialize;

/// Number of stored aliases whose original URL points at `domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DomainReportEntry {
    pub domain: String,
    pub count: i64,
}
