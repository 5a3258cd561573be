//! API route configuration.
//!
//! All routes here require Basic authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{delete_handler, save_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

/// Write routes, protected by Basic authentication.
///
/// # Endpoints
///
/// - `POST   /url`          - Store a URL under an alias
/// - `DELETE /url/{alias}`  - Remove an alias
/// - `DELETE /url`          - Empty alias, rejected with `400`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(save_handler).delete(delete_handler))
        .route("/url/{alias}", delete(delete_handler))
}
