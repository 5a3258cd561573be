//! DTOs for the delete endpoint.

use serde::{Deserialize, Serialize};

use crate::api::dto::response::Envelope;

/// Successful delete response.
///
/// ```json
/// { "status": "OK", "message": "deleted successfully" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            envelope: Envelope::ok(),
            message: "deleted successfully".to_string(),
        }
    }
}
