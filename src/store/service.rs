//! Store semantics over a pluggable backend.

use std::collections::HashMap;
use std::path::Path;

use super::backend::StorageBackend;
use super::error::{StoreError, StoreResult};
use super::file::FileBackend;
use super::memory::MemoryBackend;
use super::types::{Record, UpsertOutcome};

/// The record store: one logical collection of string-keyed records.
///
/// All access to the mapping goes through here. Input validation and error
/// shaping live in this layer; atomicity of the check-and-write is the
/// backend's contract. Every operation is safe under arbitrary interleaving
/// from concurrent callers.
///
/// The store never logs. Failures come back as typed [`StoreError`]s for
/// the caller to translate to its own surface.
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
}

impl RecordStore {
    /// Store over the transient in-memory backend.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    /// Store over the durable file backend rooted at `dir`.
    pub fn durable(dir: &Path) -> StoreResult<Self> {
        Ok(Self::with_backend(Box::new(FileBackend::open(dir)?)))
    }

    /// Store over an arbitrary backend.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Creates the record for `key` when absent, otherwise replaces its
    /// value in place.
    ///
    /// Key collision is the expected case, not an error; the outcome's
    /// `created` flag reports which branch ran. Both arguments must be
    /// non-empty.
    pub fn upsert(&self, key: &str, value: &str) -> StoreResult<UpsertOutcome> {
        non_empty(key, "key must be a non-empty string")?;
        non_empty(value, "value must be a non-empty string")?;
        self.backend.upsert_by_key(key, value)
    }

    /// Returns the record under `key`, or [`StoreError::NotFound`] when
    /// absent.
    pub fn get(&self, key: &str) -> StoreResult<Record> {
        non_empty(key, "key must be a non-empty string")?;
        self.backend
            .find_by_key(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Returns the value under `key`, or `None` when absent.
    ///
    /// The soft twin of [`get`](Self::get): absence is an ordinary answer
    /// here, not an error.
    pub fn exists(&self, key: &str) -> StoreResult<Option<String>> {
        non_empty(key, "key must be a non-empty string")?;
        Ok(self.backend.find_by_key(key)?.map(|record| record.value))
    }

    /// Returns a point-in-time snapshot of the whole collection.
    ///
    /// The snapshot is caller-owned; writes that land after it was taken do
    /// not show up in it.
    pub fn list_all(&self) -> StoreResult<HashMap<String, String>> {
        self.backend.find_all()
    }
}

fn non_empty(text: &str, requirement: &'static str) -> StoreResult<()> {
    if text.is_empty() {
        return Err(StoreError::InvalidArgument(requirement));
    }
    Ok(())
}
