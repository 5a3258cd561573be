//! PostgreSQL implementation of the alias registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{RegistryError, UrlRepository};
use crate::utils::db_error::is_unique_violation_on_alias;

/// PostgreSQL repository for URL records.
///
/// Alias uniqueness is delegated to the `url_alias_key` constraint: a save
/// that violates it is reported as [`RegistryError::AliasExists`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    url: String,
    alias: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.url, row.alias, row.created_at)
    }
}

/// Maps a driver error onto the registry taxonomy, logging the underlying error.
fn registry_error(op: &'static str, e: sqlx::Error) -> RegistryError {
    if is_unique_violation_on_alias(&e) {
        return RegistryError::AliasExists;
    }

    if matches!(e, sqlx::Error::RowNotFound) {
        return RegistryError::NotFound;
    }

    tracing::error!(op, error = %e, "Database error");
    RegistryError::StorageFailure
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, RegistryError> {
        sqlx::query_scalar::<_, i64>("INSERT INTO url (url, alias) VALUES ($1, $2) RETURNING id")
            .bind(url)
            .bind(alias)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| registry_error("url.save", e))
    }

    async fn resolve(&self, alias: &str) -> Result<String, RegistryError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| registry_error("url.resolve", e))?
            .ok_or(RegistryError::NotFound)
    }

    async fn find(&self, alias: &str) -> Result<UrlRecord, RegistryError> {
        sqlx::query_as::<_, UrlRow>(
            "SELECT id, url, alias, created_at FROM url WHERE alias = $1",
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| registry_error("url.find", e))?
        .map(UrlRecord::from)
        .ok_or(RegistryError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<i64, RegistryError> {
        sqlx::query_scalar::<_, i64>("DELETE FROM url WHERE alias = $1 RETURNING id")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| registry_error("url.delete", e))?
            .ok_or(RegistryError::NotFound)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| registry_error("url.ping", e))
    }
}
