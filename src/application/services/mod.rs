//! Business logic services for the application layer.

pub mod report_service;
pub mod shorten_service;

pub use report_service::ReportService;
pub use shorten_service::{ShortenService, ShortenerSettings};
