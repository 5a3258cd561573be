//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Alias allocation, resolution and removal
//! - [`services::auth_service::AuthService`] - Basic auth credential checks

pub mod services;
