#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use url_shortener::application::services::{AuthService, UrlService, UrlServiceSettings};
use url_shortener::domain::entities::UrlRecord;
use url_shortener::domain::repositories::{RegistryError, UrlRepository};
use url_shortener::infrastructure::persistence::InMemoryUrlRepository;
use url_shortener::routes::app_router;
use url_shortener::state::AppState;

pub const AUTH_USER: &str = "user";
pub const AUTH_PASSWORD: &str = "pass";

/// `Authorization` value for `user:pass`.
pub const VALID_AUTH: &str = "Basic dXNlcjpwYXNz";
/// `Authorization` value for `user:nope`.
pub const WRONG_AUTH: &str = "Basic dXNlcjpub3Bl";

/// Registry whose every call fails with a storage error.
pub struct FailingRepository;

#[async_trait]
impl UrlRepository for FailingRepository {
    async fn save(&self, _url: &str, _alias: &str) -> Result<i64, RegistryError> {
        Err(RegistryError::StorageFailure)
    }

    async fn resolve(&self, _alias: &str) -> Result<String, RegistryError> {
        Err(RegistryError::StorageFailure)
    }

    async fn find(&self, _alias: &str) -> Result<UrlRecord, RegistryError> {
        Err(RegistryError::StorageFailure)
    }

    async fn delete(&self, _alias: &str) -> Result<i64, RegistryError> {
        Err(RegistryError::StorageFailure)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        Err(RegistryError::StorageFailure)
    }
}

/// Registry whose calls never complete.
pub struct StalledRepository;

#[async_trait]
impl UrlRepository for StalledRepository {
    async fn save(&self, _url: &str, _alias: &str) -> Result<i64, RegistryError> {
        std::future::pending().await
    }

    async fn resolve(&self, _alias: &str) -> Result<String, RegistryError> {
        std::future::pending().await
    }

    async fn find(&self, _alias: &str) -> Result<UrlRecord, RegistryError> {
        std::future::pending().await
    }

    async fn delete(&self, _alias: &str) -> Result<i64, RegistryError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        std::future::pending().await
    }
}

/// Registry whose lookups panic.
pub struct PanickingRepository;

#[async_trait]
impl UrlRepository for PanickingRepository {
    async fn save(&self, _url: &str, _alias: &str) -> Result<i64, RegistryError> {
        panic!("registry exploded")
    }

    async fn resolve(&self, _alias: &str) -> Result<String, RegistryError> {
        panic!("registry exploded")
    }

    async fn find(&self, _alias: &str) -> Result<UrlRecord, RegistryError> {
        panic!("registry exploded")
    }

    async fn delete(&self, _alias: &str) -> Result<i64, RegistryError> {
        panic!("registry exploded")
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        panic!("registry exploded")
    }
}

pub fn create_state_with(
    repository: Arc<dyn UrlRepository>,
    settings: UrlServiceSettings,
) -> AppState {
    let url_service = Arc::new(UrlService::new(repository, settings));
    let auth_service = Arc::new(AuthService::new(AUTH_USER, AUTH_PASSWORD).unwrap());

    AppState::new(url_service, auth_service)
}

pub fn create_test_state() -> AppState {
    create_state_with(
        Arc::new(InMemoryUrlRepository::new()),
        UrlServiceSettings::default(),
    )
}

/// Serves the full application router, middleware included.
pub fn server_for(state: AppState) -> TestServer {
    server_with_timeout(state, Duration::from_secs(5))
}

pub fn server_with_timeout(state: AppState, request_timeout: Duration) -> TestServer {
    let app = app_router(state, request_timeout);

    TestServer::new(Router::new().fallback_service(app)).unwrap()
}

pub fn create_test_server() -> TestServer {
    server_for(create_test_state())
}
