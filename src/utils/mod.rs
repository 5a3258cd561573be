//! Utility functions shared across the application.
//!
//! - [`alias_generator`] - Random alias candidates
//! - [`db_error`] - Classification of PostgreSQL errors

pub mod alias_generator;
pub mod db_error;
