//! Record Store Service Library
//!
//! This library crate defines the components behind the binary (`main.rs`):
//! a single logical collection of string-keyed records served over HTTP.
//!
//! ## Architecture Modules
//!
//! The system is two loosely coupled halves plus bootstrap glue:
//!
//! - **`store`**: The data layer. Owns the key-to-value mapping behind a
//!   backend seam with a transient in-memory implementation and a durable
//!   append-log implementation. Guarantees atomic create-or-update per key
//!   and returns typed errors instead of logging.
//! - **`gateway`**: The transport layer. Decodes HTTP requests into store
//!   calls and encodes results into JSON envelopes. Owns every status code
//!   and message decision.
//! - **`config`**: Startup knobs (listen port, backend selection) resolved
//!   from flags layered over the environment.

pub mod config;
pub mod gateway;
pub mod store;
