//! Core data types for the record store.

use serde::{Deserialize, Serialize};

/// A single key/value pair held by the store.
///
/// The key identifies the record and never changes once chosen; the value is
/// the only mutable part and is replaced wholesale by every successful upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result of an upsert: the record as written, plus which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub record: Record,
    /// `true` when the key did not exist before this call.
    pub created: bool,
}
