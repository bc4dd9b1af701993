//! Application layer services implementing business logic.
//!
//! Services consume the domain traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Automatic and custom alias creation
//! - [`services::report_service::ReportService`] - Top-domains report
pub mod services;
