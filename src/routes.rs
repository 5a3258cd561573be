//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{alias}`       - Alias redirect (public)
//! - `GET    /`              - Empty alias, `400 invalid request`
//! - `GET    /health`        - Health check (public)
//! - `POST   /url`           - Create (Basic auth required)
//! - `DELETE /url/{alias}`   - Delete (Basic auth required)
//! - anything else           - `404 not found` envelope
//!
//! # Middleware
//!
//! - **Request id** - `x-request-id` assigned, logged and echoed
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline
//! - **Panic recovery** - A panicking handler yields a `500` envelope
//! - **Authentication** - Basic auth on write routes
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::{auth, recover, request_id, tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline for a whole request; slower requests get
///   `408 Request Timeout`
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .merge(api_router)
        .fallback(fallback_handler)
        .with_state(state)
        .layer(recover::layer())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(request_id::propagate_layer())
        .layer(tracing::layer())
        .layer(request_id::set_layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
