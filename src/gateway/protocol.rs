//! Gateway Wire Protocol
//!
//! Defines the HTTP routes and the JSON envelopes they speak. Every reply
//! carries a `status` marker; success payloads and failure envelopes are
//! kept as separate types so handlers cannot mix them up.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::store::types::Record;

// --- API Endpoints ---

/// Liveness marker.
pub const ENDPOINT_HEALTH: &str = "/";
/// Idempotent create-or-update.
pub const ENDPOINT_UPDATE: &str = "/update";
/// Full-collection enumeration.
pub const ENDPOINT_RECORDS: &str = "/records";
/// Point lookup; an absent key is a hard 404.
pub const ENDPOINT_RECORD: &str = "/record/:id";
/// Existence check; an absent key is a soft `exists: false`.
pub const ENDPOINT_CHECK: &str = "/check/:id";

// --- Data Transfer Objects ---

/// Outcome marker carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
    NotFound,
}

/// Body of `POST /update`.
///
/// Both fields are required on the wire. They are optional here so the
/// gateway can answer a missing field with its own 400 envelope instead of
/// a bare extractor rejection.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: Option<String>,
    pub value: Option<String>,
}

/// A record as it appears on the wire, where the key is called `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBody {
    pub id: String,
    pub value: String,
}

impl From<Record> for RecordBody {
    fn from(record: Record) -> Self {
        Self {
            id: record.key,
            value: record.value,
        }
    }
}

/// Reply for the liveness route.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: Status,
    pub message: String,
}

/// Success reply for `POST /update`; the message distinguishes created
/// from updated.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: Status,
    pub message: String,
    pub data: RecordBody,
}

/// Success reply for `GET /record/:id`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub status: Status,
    pub message: String,
    pub data: RecordBody,
}

/// Reply for `GET /check/:id`. Always 200; absence shows up as
/// `exists: false`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: Status,
    pub exists: bool,
    /// Present exactly when `exists` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Success reply for `GET /records`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub status: Status,
    pub message: String,
    pub count: usize,
    pub records: HashMap<String, String>,
}

/// Envelope for every failure: bad input, missing records, backend faults
/// and unmatched routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
    /// Backend detail, present on 500s only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
