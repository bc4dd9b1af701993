//! DTOs for the top-domains report.

use serde::Serialize;

use crate::domain::entities::DomainReportEntry;

#[derive(Debug, Serialize)]
pub struct DomainReportResponse {
    pub items: Vec<DomainReportEntry>,
    pub count: usize,
}

impl From<Vec<DomainReportEntry>> for DomainReportResponse {
    fn from(items: Vec<DomainReportEntry>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
