//! Record Store Module
//!
//! Owns the single logical collection of string-keyed records behind the service.
//!
//! ## Core Concepts
//! - **Semantics**: `RecordStore` validates input, shapes errors and exposes the four operations (upsert, get, exists, list-all).
//! - **Seam**: `StorageBackend` separates those semantics from the storage medium; per-key atomicity is its contract.
//! - **Backends**: Transient `MemoryBackend` or durable `FileBackend`, chosen once at startup and never swapped mid-flight.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;
pub mod service;
pub mod types;
