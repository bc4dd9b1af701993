//! Utility functions for code generation and URL processing.
//!
//! - [`base62`] - Base-62 text encoding
//! - [`code_generator`] - Digest-derived codes and custom alias validation
//! - [`url_normalizer`] - Canonical form of incoming URLs

pub mod base62;
pub mod code_generator;
pub mod url_normalizer;
