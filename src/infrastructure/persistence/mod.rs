//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Alias rows with insert-or-ignore writes
//! - [`PgDomainReportRepository`] - Top-domains aggregate

pub mod pg_report_repository;
pub mod pg_url_repository;

pub use pg_report_repository::PgDomainReportRepository;
pub use pg_url_repository::PgUrlRepository;
