//! HTTP Gateway Module
//!
//! The transport skin over the record store.
//!
//! ## Core Concepts
//! - **Routing**: One axum `Router` covering the five routes plus a JSON 404 fallback; the store rides along as an `Extension`.
//! - **Envelopes**: Every reply is JSON with a `status` marker, shaped in `protocol`.
//! - **Error mapping**: Store failures become 400 (invalid input), 404 (missing record) or 500 (backend fault) in `handlers`; the store itself never logs or picks status codes.
//! - **Cross-origin**: An allow-all CORS layer wraps the whole surface, preflight included, so browser pages on any origin can call it.

pub mod handlers;
pub mod protocol;


use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::store::service::RecordStore;
use protocol::{
    ENDPOINT_CHECK, ENDPOINT_HEALTH, ENDPOINT_RECORD, ENDPOINT_RECORDS, ENDPOINT_UPDATE,
};

/// Builds the full HTTP surface over `store`.
pub fn router(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route(ENDPOINT_HEALTH, get(handlers::handle_health))
        .route(ENDPOINT_UPDATE, post(handlers::handle_update))
        .route(ENDPOINT_RECORDS, get(handlers::handle_list_records))
        .route(ENDPOINT_RECORD, get(handlers::handle_get_record))
        .route(ENDPOINT_CHECK, get(handlers::handle_check_record))
        .fallback(handlers::handle_unmatched)
        .layer(Extension(store))
        // Outermost layer: even fallback and error replies carry the headers.
        .layer(CorsLayer::permissive())
}
