//! Repository trait for the alias registry.

use crate::domain::entities::UrlRecord;
use async_trait::async_trait;

/// Typed outcomes of a registry operation.
///
/// Implementations translate their native errors into exactly these kinds.
/// Store-specific error text is logged by the implementation and never carried
/// in the error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No live record is bound to the alias.
    #[error("alias not found")]
    NotFound,

    /// The alias is already bound to a live record.
    #[error("alias already exists")]
    AliasExists,

    /// Any other persistence or connectivity failure.
    #[error("storage failure")]
    StorageFailure,
}

/// Persistent store mapping aliases to URLs.
///
/// Alias uniqueness is enforced by the store itself at write time. Callers
/// must not check for existence before calling [`UrlRepository::save`];
/// the `AliasExists` outcome of the write is authoritative.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new record and returns its identifier.
    ///
    /// The write is atomic: either the record is committed or nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AliasExists`] if the alias is already taken.
    /// Returns [`RegistryError::StorageFailure`] on any other error.
    async fn save(&self, url: &str, alias: &str) -> Result<i64, RegistryError>;

    /// Returns the URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record has that alias.
    /// Returns [`RegistryError::StorageFailure`] on any other error.
    async fn resolve(&self, alias: &str) -> Result<String, RegistryError>;

    /// Returns the full record bound to `alias`.
    ///
    /// # Errors
    ///
    /// Same as [`UrlRepository::resolve`].
    async fn find(&self, alias: &str) -> Result<UrlRecord, RegistryError>;

    /// Removes the record bound to `alias` and returns its former identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record has that alias.
    /// Returns [`RegistryError::StorageFailure`] on any other error.
    async fn delete(&self, alias: &str) -> Result<i64, RegistryError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StorageFailure`] if it is not.
    async fn ping(&self) -> Result<(), RegistryError>;
}
