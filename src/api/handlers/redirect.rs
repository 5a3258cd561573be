//! Handler for alias redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::handlers::alias_or_empty;
use crate::application::services::UrlServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}` (and `GET /`, which is answered as an empty alias)
///
/// # Response
///
/// `302 Found` with the stored URL in `Location`. No body envelope is sent on
/// success.
///
/// # Errors
///
/// - 400 `invalid request` if the alias is empty or undecodable
/// - 404 `not found` if the alias is unknown
/// - 500 `failed to get url` on storage failure
pub async fn redirect_handler(
    State(state): State<AppState>,
    alias: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let alias = alias_or_empty(alias);

    let url = state.url_service.resolve(&alias).await.map_err(|e| match e {
        UrlServiceError::InvalidAlias => {
            tracing::info!("alias is empty");
            AppError::bad_request("invalid request")
        }
        UrlServiceError::NotFound => {
            tracing::info!(alias = %alias, "not found");
            AppError::not_found("not found")
        }
        other => {
            tracing::error!(alias = %alias, error = %other, "failed to get url");
            AppError::internal("failed to get url")
        }
    })?;

    let location = location_header(&url).map_err(|_| {
        tracing::error!(alias = %alias, "stored url is not a valid header value");
        AppError::internal("failed to get url")
    })?;

    tracing::debug!(alias = %alias, url = %url, "redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, percent-encoding non-ASCII bytes.
fn location_header(url: &str) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    if url.is_ascii() {
        return HeaderValue::from_str(url);
    }

    let mut escaped = String::with_capacity(url.len() * 3);
    for byte in url.bytes() {
        if byte.is_ascii() {
            escaped.push(char::from(byte));
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }

    HeaderValue::from_str(&escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_keeps_ascii() {
        let value = location_header("https://example.com/a?b=c%20d").unwrap();

        assert_eq!(value, "https://example.com/a?b=c%20d");
    }

    #[test]
    fn test_location_header_escapes_non_ascii() {
        let value = location_header("https://example.com/ü").unwrap();

        assert_eq!(value, "https://example.com/%C3%BC");
    }
}
