//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - The two-tier facade combining both

pub mod cache;
pub mod persistence;
pub mod storage;
