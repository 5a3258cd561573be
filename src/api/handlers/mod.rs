//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint. Handlers translate
//! [`crate::application::services::UrlServiceError`] outcomes into fixed
//! user-facing messages.

pub mod delete;
pub mod health;
pub mod redirect;
pub mod save;

pub use delete::delete_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use save::save_handler;

use axum::extract::{Path, rejection::PathRejection};

use crate::error::AppError;

/// Unwraps the `{alias}` segment; a route without it yields an empty alias,
/// which the service rejects as invalid.
pub(crate) fn alias_or_empty(alias: Result<Path<String>, PathRejection>) -> String {
    match alias {
        Ok(Path(alias)) => alias,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "no usable alias in path");
            String::new()
        }
    }
}

/// Envelope `404` for paths no route matches.
pub async fn fallback_handler() -> AppError {
    AppError::not_found("not found")
}
