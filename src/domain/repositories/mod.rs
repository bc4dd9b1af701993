//! Repository trait definitions for the domain layer.
//!
//! # Available Traits
//!
//! - [`UrlRepository`] - Persistent alias rows keyed by short URL
//! - [`UrlStorage`] - Facade over the persistent store and the cache
//! - [`DomainReportRepository`] - Top-domains aggregate
//!
//! Implementations live in `crate::infrastructure`. Mock implementations are
//! generated via `mockall` for unit tests.

pub mod report_repository;
pub mod url_repository;
pub mod url_storage;

pub use report_repository::DomainReportRepository;
pub use url_repository::UrlRepository;
pub use url_storage::UrlStorage;

#[cfg(test)]
pub use report_repository::MockDomainReportRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use url_storage::MockUrlStorage;
