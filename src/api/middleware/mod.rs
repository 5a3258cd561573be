//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, request ids, panic recovery and observability
//! middleware.

pub mod auth;
pub mod recover;
pub mod request_id;
pub mod tracing;
