//! Handler for the create endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::response::Envelope;
use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::application::services::UrlServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL under a caller-chosen or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "alias": "promo" }
/// ```
///
/// `alias` is optional; when absent or empty a random 6-character alias is
/// generated.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "promo" }
/// ```
///
/// # Errors
///
/// - 400 if the body is not valid JSON or `url` is missing / not an absolute URL
/// - 409 if the alias is already taken
/// - 503 if no free alias could be generated
/// - 500 on storage failure
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "failed to decode request body");
        AppError::bad_request("failed to decode request body")
    })?;

    if let Err(errors) = payload.validate() {
        tracing::info!(error = %errors, "invalid request");
        return Err(errors.into());
    }

    let alias = state
        .url_service
        .create(&payload.url, payload.alias.as_deref())
        .await
        .map_err(|e| match e {
            UrlServiceError::AliasExists => {
                tracing::info!(url = %payload.url, "url already exists");
                AppError::conflict("url already exists")
            }
            UrlServiceError::GeneratorExhausted { attempts } => {
                tracing::error!(attempts, "failed to generate alias");
                AppError::unavailable("failed to generate alias")
            }
            other => {
                tracing::error!(error = %other, "failed to add url");
                AppError::internal("failed to add url")
            }
        })?;

    Ok(Json(SaveResponse {
        envelope: Envelope::ok(),
        alias,
    }))
}
