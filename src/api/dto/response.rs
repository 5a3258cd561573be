//! Uniform response envelope shared by all endpoints.

use serde::{Deserialize, Serialize};

/// Outcome marker carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// A single failed input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Envelope wrapping every JSON response.
///
/// ```json
/// { "status": "Error", "error": "Validation Error",
///   "validationErrors": [{ "field": "url", "message": "field url is not a valid URL" }] }
/// ```
///
/// `error` is only present when `status` is `Error`; `validationErrors` only
/// for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(
        rename = "validationErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation_errors: Option<Vec<FieldError>>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
            validation_errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
            validation_errors: None,
        }
    }

    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            status: Status::Error,
            error: Some("Validation Error".to_string()),
            validation_errors: Some(fields),
        }
    }
}
