//! Backend seam between store semantics and the storage medium.

use std::collections::HashMap;

use super::error::StoreResult;
use super::types::{Record, UpsertOutcome};

/// A backing medium for the record store.
///
/// Backends own the physical key-to-value mapping; the semantics layer
/// ([`RecordStore`](super::service::RecordStore)) validates input and shapes
/// errors. One backend is picked at process start and never swapped while
/// the process lives.
///
/// # Contract
///
/// - `upsert_by_key` is atomic per key: the presence check, the
///   created-vs-updated decision and the write form one indivisible unit.
///   Racing upserts on the same key serialize; neither write is lost.
/// - `find_by_key` reflects every upsert that completed before it on the
///   same key, and returns a copy rather than a live reference.
/// - `find_all` is a point-in-time copy. Entries in it are never torn by
///   concurrent upserts: old value or new value, nothing in between.
/// - Implementations are `Send + Sync`; calls arrive from any number of
///   concurrent requests.
pub trait StorageBackend: Send + Sync {
    /// Returns the record stored under `key`, or `None` when absent.
    fn find_by_key(&self, key: &str) -> StoreResult<Option<Record>>;

    /// Writes `value` under `key`, creating the record when the key is new.
    fn upsert_by_key(&self, key: &str, value: &str) -> StoreResult<UpsertOutcome>;

    /// Returns a snapshot of the entire mapping.
    fn find_all(&self) -> StoreResult<HashMap<String, String>>;
}
