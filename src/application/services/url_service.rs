//! Alias creation, resolution and removal.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, Span};

use crate::domain::repositories::{RegistryError, UrlRepository};
use crate::utils::alias_generator::generate_alias;

/// Failure kinds surfaced by [`UrlService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlServiceError {
    /// Required alias was empty.
    #[error("invalid request")]
    InvalidAlias,

    #[error("alias not found")]
    NotFound,

    #[error("alias already exists")]
    AliasExists,

    /// Every generated candidate collided with an existing alias.
    #[error("no free alias found after {attempts} attempts")]
    GeneratorExhausted { attempts: usize },

    /// The registry failed or did not answer in time.
    #[error("storage failure")]
    Storage,
}

impl From<RegistryError> for UrlServiceError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound => Self::NotFound,
            RegistryError::AliasExists => Self::AliasExists,
            RegistryError::StorageFailure => Self::Storage,
        }
    }
}

/// Tunables for [`UrlService`], taken from [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct UrlServiceSettings {
    /// Length of generated aliases.
    pub alias_length: usize,
    /// Maximum number of generated candidates tried per create.
    pub max_attempts: usize,
    /// Upper bound on a single registry call.
    pub registry_timeout: Duration,
}

impl Default for UrlServiceSettings {
    fn default() -> Self {
        Self {
            alias_length: 6,
            max_attempts: 10,
            registry_timeout: Duration::from_secs(2),
        }
    }
}

/// Service orchestrating the create, resolve and delete operations.
///
/// The registry is the single source of truth for alias uniqueness. When no
/// alias is supplied the service writes a generated candidate and redraws only
/// if the registry reports [`RegistryError::AliasExists`], up to
/// `max_attempts` times. Generic storage failures are never retried.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    settings: UrlServiceSettings,
    span: Span,
}

impl UrlService {
    /// Creates a new URL service.
    ///
    /// Operations are recorded under a `url_service` span created here.
    pub fn new(repository: Arc<dyn UrlRepository>, settings: UrlServiceSettings) -> Self {
        Self {
            repository,
            settings,
            span: tracing::info_span!("url_service"),
        }
    }

    /// Stores `url` under `alias`, or under a generated alias when `alias` is
    /// `None` or empty. Returns the alias the record was stored under.
    ///
    /// `url` is expected to be validated by the caller.
    ///
    /// # Errors
    ///
    /// - [`UrlServiceError::AliasExists`] if the caller's alias is taken
    /// - [`UrlServiceError::GeneratorExhausted`] if no generated alias was free
    /// - [`UrlServiceError::Storage`] on registry failure or timeout
    pub async fn create(&self, url: &str, alias: Option<&str>) -> Result<String, UrlServiceError> {
        async {
            match alias.filter(|a| !a.is_empty()) {
                Some(alias) => {
                    let id = self.call(self.repository.save(url, alias)).await?;
                    tracing::info!(id, alias, "url saved");
                    Ok(alias.to_owned())
                }
                None => self.save_with_generated_alias(url).await,
            }
        }
        .instrument(self.span.clone())
        .await
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// - [`UrlServiceError::InvalidAlias`] if `alias` is empty
    /// - [`UrlServiceError::NotFound`] if nothing is stored under it
    /// - [`UrlServiceError::Storage`] on registry failure or timeout
    pub async fn resolve(&self, alias: &str) -> Result<String, UrlServiceError> {
        if alias.is_empty() {
            return Err(UrlServiceError::InvalidAlias);
        }

        self.call(self.repository.resolve(alias))
            .instrument(self.span.clone())
            .await
    }

    /// Removes the record stored under `alias` and returns its former id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn delete(&self, alias: &str) -> Result<i64, UrlServiceError> {
        if alias.is_empty() {
            return Err(UrlServiceError::InvalidAlias);
        }

        async {
            let id = self.call(self.repository.delete(alias)).await?;
            tracing::info!(id, alias, "url deleted");
            Ok(id)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Reports whether the registry is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.call(self.repository.ping())
            .instrument(self.span.clone())
            .await
            .is_ok()
    }

    /// Writes generated candidates until one is accepted by the registry.
    async fn save_with_generated_alias(&self, url: &str) -> Result<String, UrlServiceError> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate = generate_alias(self.settings.alias_length);

            match self.call(self.repository.save(url, &candidate)).await {
                Ok(id) => {
                    tracing::info!(id, alias = %candidate, attempt, "url saved");
                    return Ok(candidate);
                }
                Err(UrlServiceError::AliasExists) => {
                    tracing::debug!(alias = %candidate, attempt, "generated alias collided");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(max_attempts, "no free alias found");
        Err(UrlServiceError::GeneratorExhausted {
            attempts: max_attempts,
        })
    }

    /// Runs a registry call under the configured timeout.
    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, RegistryError>>,
    ) -> Result<T, UrlServiceError> {
        match tokio::time::timeout(self.settings.registry_timeout, fut).await {
            Ok(result) => result.map_err(UrlServiceError::from),
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.settings.registry_timeout.as_millis() as u64,
                    "registry call timed out"
                );
                Err(UrlServiceError::Storage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::persistence::InMemoryUrlRepository;
    use mockall::Sequence;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn service_with(repo: MockUrlRepository) -> UrlService {
        UrlService::new(Arc::new(repo), UrlServiceSettings::default())
    }

    fn is_valid_alias(alias: &str, length: usize) -> bool {
        alias.len() == length && alias.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .withf(|url, alias| url == "https://example.com" && alias == "promo")
            .times(1)
            .returning(|_, _| Ok(1));

        let service = service_with(mock_repo);

        let alias = service
            .create("https://example.com", Some("promo"))
            .await
            .unwrap();

        assert_eq!(alias, "promo");
    }

    #[tokio::test]
    async fn test_create_custom_alias_conflict() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .times(1)
            .returning(|_, _| Err(RegistryError::AliasExists));

        let service = service_with(mock_repo);

        let result = service.create("https://example.com", Some("taken")).await;

        assert_eq!(result, Err(UrlServiceError::AliasExists));
    }

    #[tokio::test]
    async fn test_create_generates_alias() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .withf(|_, alias| is_valid_alias(alias, 6))
            .times(1)
            .returning(|_, _| Ok(1));

        let service = service_with(mock_repo);

        let alias = service.create("https://example.com", None).await.unwrap();

        assert!(is_valid_alias(&alias, 6));
    }

    #[tokio::test]
    async fn test_create_empty_alias_is_treated_as_missing() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .withf(|_, alias| is_valid_alias(alias, 6))
            .times(1)
            .returning(|_, _| Ok(1));

        let service = service_with(mock_repo);

        let alias = service
            .create("https://example.com", Some(""))
            .await
            .unwrap();

        assert_eq!(alias.len(), 6);
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();
        let tried = Arc::new(Mutex::new(Vec::new()));

        let seen = tried.clone();
        mock_repo
            .expect_save()
            .times(2)
            .in_sequence(&mut seq)
            .returning(move |_, alias| {
                seen.lock().unwrap().push(alias.to_string());
                Err(RegistryError::AliasExists)
            });

        let seen = tried.clone();
        mock_repo
            .expect_save()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, alias| {
                seen.lock().unwrap().push(alias.to_string());
                Ok(42)
            });

        let service = service_with(mock_repo);

        let alias = service.create("https://example.com", None).await.unwrap();

        let tried = tried.lock().unwrap();
        assert_eq!(tried.len(), 3);
        assert_eq!(tried.last().unwrap(), &alias);
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .times(3)
            .returning(|_, _| Err(RegistryError::AliasExists));

        let settings = UrlServiceSettings {
            max_attempts: 3,
            ..UrlServiceSettings::default()
        };
        let service = UrlService::new(Arc::new(mock_repo), settings);

        let result = service.create("https://example.com", None).await;

        assert_eq!(
            result,
            Err(UrlServiceError::GeneratorExhausted { attempts: 3 })
        );
    }

    #[tokio::test]
    async fn test_create_does_not_retry_storage_failure() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_save()
            .times(1)
            .returning(|_, _| Err(RegistryError::StorageFailure));

        let service = service_with(mock_repo);

        let result = service.create("https://example.com", None).await;

        assert_eq!(result, Err(UrlServiceError::Storage));
    }

    #[tokio::test]
    async fn test_create_never_probes_before_writing() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_resolve().times(0);
        mock_repo.expect_find().times(0);
        mock_repo.expect_save().times(1).returning(|_, _| Ok(1));

        let service = service_with(mock_repo);

        assert!(service.create("https://example.com", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_resolve()
            .withf(|alias| alias == "abc123")
            .times(1)
            .returning(|_| Ok("https://example.com".to_string()));

        let service = service_with(mock_repo);

        let url = service.resolve("abc123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_resolve()
            .times(1)
            .returning(|_| Err(RegistryError::NotFound));

        let service = service_with(mock_repo);

        assert_eq!(
            service.resolve("missing").await,
            Err(UrlServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_empty_alias_rejected_before_store_access() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_resolve().times(0);
        mock_repo.expect_delete().times(0);

        let service = service_with(mock_repo);

        assert_eq!(service.resolve("").await, Err(UrlServiceError::InvalidAlias));
        assert_eq!(service.delete("").await, Err(UrlServiceError::InvalidAlias));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_delete()
            .withf(|alias| alias == "abc123")
            .times(1)
            .returning(|_| Ok(5));

        let service = service_with(mock_repo);

        assert_eq!(service.delete("abc123").await, Ok(5));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(RegistryError::NotFound));

        let service = service_with(mock_repo);

        assert_eq!(
            service.delete("missing").await,
            Err(UrlServiceError::NotFound)
        );
    }

    /// Registry whose reads never complete.
    struct StalledRepository;

    #[async_trait::async_trait]
    impl UrlRepository for StalledRepository {
        async fn save(&self, _: &str, _: &str) -> Result<i64, RegistryError> {
            std::future::pending().await
        }
        async fn resolve(&self, _: &str) -> Result<String, RegistryError> {
            std::future::pending().await
        }
        async fn find(
            &self,
            _: &str,
        ) -> Result<crate::domain::entities::UrlRecord, RegistryError> {
            std::future::pending().await
        }
        async fn delete(&self, _: &str) -> Result<i64, RegistryError> {
            std::future::pending().await
        }
        async fn ping(&self) -> Result<(), RegistryError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_registry_call_times_out() {
        let settings = UrlServiceSettings {
            registry_timeout: Duration::from_millis(20),
            ..UrlServiceSettings::default()
        };
        let service = UrlService::new(Arc::new(StalledRepository), settings);

        assert_eq!(service.resolve("abc").await, Err(UrlServiceError::Storage));
        assert_eq!(
            service.create("https://example.com", None).await,
            Err(UrlServiceError::Storage)
        );
        assert!(!service.is_healthy().await);
    }

    #[tokio::test]
    async fn test_round_trip_with_in_memory_registry() {
        let service = UrlService::new(
            Arc::new(InMemoryUrlRepository::new()),
            UrlServiceSettings::default(),
        );

        let alias = service
            .create("https://example.com/page", None)
            .await
            .unwrap();
        assert!(is_valid_alias(&alias, 6));

        assert_eq!(
            service.resolve(&alias).await.unwrap(),
            "https://example.com/page"
        );
        assert!(service.delete(&alias).await.is_ok());
        assert_eq!(service.resolve(&alias).await, Err(UrlServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_exhaustion_with_single_character_alphabet_space() {
        // Length 1 leaves 62 possible aliases; once all are taken every
        // further create must stop at the attempt cap.
        let repo = Arc::new(InMemoryUrlRepository::new());
        for c in crate::utils::alias_generator::ALPHABET.iter() {
            let alias = (*c as char).to_string();
            repo.save("https://example.com", &alias).await.unwrap();
        }

        let settings = UrlServiceSettings {
            alias_length: 1,
            max_attempts: 5,
            ..UrlServiceSettings::default()
        };
        let service = UrlService::new(repo, settings);

        assert_eq!(
            service.create("https://example.com", None).await,
            Err(UrlServiceError::GeneratorExhausted { attempts: 5 })
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_same_alias() {
        let service = Arc::new(UrlService::new(
            Arc::new(InMemoryUrlRepository::new()),
            UrlServiceSettings::default(),
        ));

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.create("https://a.com", Some("promo")).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.create("https://b.com", Some("promo")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| **r == Err(UrlServiceError::AliasExists))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_generated_aliases_are_distinct() {
        let service = UrlService::new(
            Arc::new(InMemoryUrlRepository::new()),
            UrlServiceSettings::default(),
        );

        let mut aliases = HashSet::new();
        for _ in 0..100 {
            aliases.insert(service.create("https://example.com", None).await.unwrap());
        }

        assert_eq!(aliases.len(), 100);
    }
}
