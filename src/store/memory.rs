//! Transient in-process backend.

use std::collections::HashMap;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::backend::StorageBackend;
use super::error::StoreResult;
use super::types::{Record, UpsertOutcome};

/// In-memory backend over a sharded concurrent map.
///
/// State lives for the process lifetime only. An upsert holds the key's
/// shard for the whole check-and-write, so racing writers on one key
/// serialize while writes to other keys proceed in parallel.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn find_by_key(&self, key: &str) -> StoreResult<Option<Record>> {
        Ok(self
            .records
            .get(key)
            .map(|entry| Record::new(key, entry.value().clone())))
    }

    fn upsert_by_key(&self, key: &str, value: &str) -> StoreResult<UpsertOutcome> {
        let created = match self.records.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(value.to_string());
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value.to_string());
                true
            }
        };

        Ok(UpsertOutcome {
            record: Record::new(key, value),
            created,
        })
    }

    fn find_all(&self) -> StoreResult<HashMap<String, String>> {
        Ok(self
            .records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }
}
