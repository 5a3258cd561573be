//! DTOs for the create endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::dto::response::Envelope;

/// Request to store a URL under an alias.
///
/// An absent or empty `alias` asks the service to generate one.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The URL to shorten. Must be a syntactically valid absolute URL.
    #[serde(default)]
    #[validate(length(min = 1), url, custom(function = "stored_verbatim"))]
    pub url: String,

    /// Optional caller-chosen alias, stored as-is.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Rejects input the URL parser would silently clean up.
///
/// The parser drops tabs and newlines and trims surrounding whitespace, but
/// the raw string is what gets stored and later sent back in `Location`.
fn stored_verbatim(url: &str) -> Result<(), ValidationError> {
    if url.chars().any(char::is_control) || url.trim() != url {
        return Err(ValidationError::new("url"));
    }
    Ok(())
}

/// Successful create response.
///
/// ```json
/// { "status": "OK", "alias": "aZ3k9Q" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub alias: String,
}
