//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            url_service,
            auth_service,
        }
    }
}
