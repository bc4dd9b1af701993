//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the infrastructure or presentation layers.
//! Repository traits define contracts implemented by [`crate::infrastructure`], and the
//! resolver in [`crate::application::services`] only talks to those traits.

pub mod entities;
pub mod repositories;
