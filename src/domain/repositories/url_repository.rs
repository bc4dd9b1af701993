//! Repository trait for the persistent alias store.

use crate::domain::entities::StoredUrl;
use crate::error::StorageError;
use async_trait::async_trait;

/// Persistent store of [`StoredUrl`] rows keyed by `short_url`.
///
/// The unique key on `short_url` decides which writer wins a race: only one row can
/// exist per key and every other insert is a silent no-op.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a row by its short URL, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on backend failure.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<StoredUrl>, StorageError>;

    /// Inserts the row unless its key already exists.
    ///
    /// `row.created_at` is ignored; the store stamps its own. Returns `true` if this call
    /// inserted the row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on backend failure. A duplicate key is not an error.
    async fn insert_or_ignore(&self, row: StoredUrl) -> Result<bool, StorageError>;

    /// Inserts the row unless its key exists, and returns whichever row now owns the key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on backend failure.
    async fn insert_if_absent(&self, row: StoredUrl) -> Result<StoredUrl, StorageError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), StorageError>;
}
