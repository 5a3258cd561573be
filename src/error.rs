//! HTTP-facing error type.
//!
//! Every variant renders as an [`Envelope`] with a fixed status code. Messages
//! are chosen by handlers; internal diagnostics are logged, never returned.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::response::{Envelope, FieldError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("400 Validation Error")]
    Validation { fields: Vec<FieldError> },
    #[error("400 {message}")]
    BadRequest { message: String },
    #[error("401 {message}")]
    Unauthorized { message: String },
    #[error("404 {message}")]
    NotFound { message: String },
    #[error("409 {message}")]
    Conflict { message: String },
    #[error("503 {message}")]
    Unavailable { message: String },
    #[error("500 {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self::Validation { fields }
    }
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its response envelope.
    pub fn to_envelope(&self) -> Envelope {
        match self {
            AppError::Validation { fields } => Envelope::validation(fields.clone()),
            AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Unavailable { message }
            | AppError::Internal { message } => Envelope::error(message.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self.to_envelope())).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="url-shortener", charset="UTF-8""#),
            );
        }

        response
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                // A missing value fails every rule; report only that it is missing.
                let missing = errs.iter().any(|e| e.code == "required" || e.code == "length");
                let message = if missing {
                    format!("field {field} is a required field")
                } else {
                    errs.first()
                        .map(|e| describe_validation_error(&field, &e.code))
                        .unwrap_or_else(|| format!("field {field} is not valid"))
                };

                FieldError {
                    field: field.to_string(),
                    message,
                }
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::validation(fields)
    }
}

fn describe_validation_error(field: &str, code: &str) -> String {
    match code {
        "url" => format!("field {field} is not a valid URL"),
        _ => format!("field {field} is not valid"),
    }
}
