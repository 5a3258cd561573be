//! Core domain entities.
//!
//! Entities are plain data structures without business logic.
//!
//! - [`UrlRecord`] - An alias bound to a destination URL

pub mod url_record;

pub use url_record::UrlRecord;
