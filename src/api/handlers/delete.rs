//! Handler for alias removal.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::api::dto::delete::DeleteResponse;
use crate::api::handlers::alias_or_empty;
use crate::application::services::UrlServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes the record stored under an alias.
///
/// # Endpoint
///
/// `DELETE /url/{alias}` (Basic auth). `DELETE /url` is answered as an empty alias.
///
/// The record is removed from the store; the alias becomes available again.
///
/// # Errors
///
/// - 400 `invalid request` if the alias is empty or undecodable
/// - 404 `not found` if the alias is unknown
/// - 500 `failed to delete` on storage failure
pub async fn delete_handler(
    State(state): State<AppState>,
    alias: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let alias = alias_or_empty(alias);

    state.url_service.delete(&alias).await.map_err(|e| match e {
        UrlServiceError::InvalidAlias => AppError::bad_request("invalid request"),
        UrlServiceError::NotFound => {
            tracing::info!(alias = %alias, "not found");
            AppError::not_found("not found")
        }
        other => {
            tracing::error!(alias = %alias, error = %other, "failed to delete");
            AppError::internal("failed to delete")
        }
    })?;

    Ok(Json(DeleteResponse::deleted()))
}
