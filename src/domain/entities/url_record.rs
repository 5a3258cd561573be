//! URL record entity representing one alias → URL binding.

use chrono::{DateTime, Utc};

/// A stored mapping from a short alias to its destination URL.
///
/// `id` and `created_at` are assigned by the store. `alias` is unique among
/// live records; `url` is not, so one destination may have several aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, url: String, alias: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            alias,
            created_at,
        }
    }
}
