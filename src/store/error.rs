//! Error taxonomy for store operations.

use std::io;

use thiserror::Error;

/// Result alias used across the store.
pub type StoreResult<T> = Result<T, StoreError>;

/// Everything that can go wrong inside the record store.
///
/// The store itself never logs; it hands these back and lets the caller
/// decide how each class maps onto its own surface. The HTTP gateway turns
/// them into 400, 404 and 500 responses respectively.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An empty key or value reached the store.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No record exists under the requested key.
    #[error("no record found for key {0:?}")]
    NotFound(String),

    /// The backing medium could not be read or a write could not be
    /// committed. Transient in principle; retrying is the caller's call.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
