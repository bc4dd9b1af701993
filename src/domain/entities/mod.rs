//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortenedUrl`] - A resolved alias with its remaining lifetime
//! - [`NewShortenedUrl`] - Input for a write, carrying the requested lifetime
//! - [`StoredUrl`] - The persisted row (and cached value) with an absolute expiry
//! - [`DomainReportEntry`] - A derived per-domain count
//!
//! Creation and read shapes are separate structs, so the remaining TTL is only ever
//! computed from a stored expiry.

pub mod domain_report;
pub mod shortened_url;

pub use domain_report::DomainReportEntry;
pub use shortened_url::{
    MAX_TTL_SECONDS, NewShortenedUrl, ShortenedUrl, StoredUrl, domain_of, expiry_after,
    remaining_ttl,
};
