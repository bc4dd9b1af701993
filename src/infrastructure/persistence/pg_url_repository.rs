//! PostgreSQL implementation of the alias store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::StoredUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::StorageError;

/// PostgreSQL repository for alias rows in `short_urls`.
///
/// `short_url` is the primary key; every insert uses `ON CONFLICT (short_url) DO NOTHING`
/// so an existing row is never overwritten. `created_at` comes from the database clock.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<StoredUrl>, StorageError> {
        let row = sqlx::query_as::<_, StoredUrl>(
            r#"
            SELECT url, short_url, domain, expires_at, created_at
            FROM short_urls
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn insert_or_ignore(&self, row: StoredUrl) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (url, short_url, domain, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_url) DO NOTHING
            "#,
        )
        .bind(&row.url)
        .bind(&row.short_url)
        .bind(&row.domain)
        .bind(row.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn insert_if_absent(&self, row: StoredUrl) -> Result<StoredUrl, StorageError> {
        let owner = sqlx::query_as::<_, StoredUrl>(
            r#"
            WITH inserted AS (
                INSERT INTO short_urls (url, short_url, domain, expires_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (short_url) DO NOTHING
                RETURNING url, short_url, domain, expires_at, created_at
            )
            SELECT url, short_url, domain, expires_at, created_at FROM inserted
            UNION ALL
            SELECT url, short_url, domain, expires_at, created_at
            FROM short_urls
            WHERE short_url = $2 AND NOT EXISTS (SELECT 1 FROM inserted)
            "#,
        )
        .bind(&row.url)
        .bind(&row.short_url)
        .bind(&row.domain)
        .bind(row.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(owner) = owner {
            return Ok(owner);
        }

        // The conflicting row was committed after this statement's snapshot was taken;
        // a fresh statement sees it.
        self.find_by_short_url(&row.short_url)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
