//! In-memory implementation of the alias registry.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{RegistryError, UrlRepository};

/// Registry kept in process memory.
///
/// Backed by a sharded [`DashMap`]. Uniqueness is enforced through the map's
/// entry API, which holds the shard lock between the vacancy check and the
/// insert, so two racing saves of one alias cannot both succeed.
///
/// Records do not survive a restart. Intended for local development and tests.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, RegistryError> {
        match self.storage.entry(alias.to_owned()) {
            Entry::Occupied(_) => Err(RegistryError::AliasExists),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(UrlRecord::new(
                    id,
                    url.to_owned(),
                    alias.to_owned(),
                    Utc::now(),
                ));
                Ok(id)
            }
        }
    }

    async fn resolve(&self, alias: &str) -> Result<String, RegistryError> {
        self.storage
            .get(alias)
            .map(|record| record.url.clone())
            .ok_or(RegistryError::NotFound)
    }

    async fn find(&self, alias: &str) -> Result<UrlRecord, RegistryError> {
        self.storage
            .get(alias)
            .map(|record| record.clone())
            .ok_or(RegistryError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<i64, RegistryError> {
        self.storage
            .remove(alias)
            .map(|(_, record)| record.id)
            .ok_or(RegistryError::NotFound)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        Ok(())
    }
}
