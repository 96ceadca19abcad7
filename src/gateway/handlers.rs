use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use std::sync::Arc;

use super::protocol::{
    CheckResponse, ErrorResponse, HealthResponse, ListResponse, RecordResponse, Status,
    UpdateRequest, UpdateResponse,
};
use crate::store::error::StoreError;
use crate::store::service::RecordStore;

/// Failure half of every fallible handler.
pub type Failure = (StatusCode, Json<ErrorResponse>);

pub async fn handle_health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: Status::Success,
            message: "Backend is running and healthy.".to_string(),
        }),
    )
}

pub async fn handle_update(
    Extension(store): Extension<Arc<RecordStore>>,
    request: Option<Json<UpdateRequest>>,
) -> Result<(StatusCode, Json<UpdateResponse>), Failure> {
    // A malformed body extracts as None and lands on the same envelope as a
    // missing field.
    let Some((id, value)) = request.and_then(required_fields) else {
        return Err(bad_request("Missing 'id' or 'value' in request body."));
    };

    // The durable backend hits the disk before acknowledging; that wait
    // belongs on the blocking pool, not an async worker.
    let written = {
        let store = Arc::clone(&store);
        let key = id.clone();
        tokio::task::spawn_blocking(move || store.upsert(&key, &value))
            .await
            .unwrap_or_else(|err| Err(StoreError::Unavailable(err.to_string())))
    };

    match written {
        Ok(outcome) => {
            let message = if outcome.created {
                "New record created."
            } else {
                "Record updated successfully."
            };
            Ok((
                StatusCode::OK,
                Json(UpdateResponse {
                    status: Status::Success,
                    message: message.to_string(),
                    data: outcome.record.into(),
                }),
            ))
        }
        Err(err) => {
            tracing::error!("Failed to update record {}: {}", id, err);
            Err(store_failure("Database error while updating record.", &err))
        }
    }
}

pub async fn handle_get_record(
    Extension(store): Extension<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecordResponse>), Failure> {
    match store.get(&id) {
        Ok(record) => Ok((
            StatusCode::OK,
            Json(RecordResponse {
                status: Status::Success,
                message: "Record found.".to_string(),
                data: record.into(),
            }),
        )),
        Err(err) => {
            // Absence is routine here; only backend faults are worth noise.
            if matches!(err, StoreError::Unavailable(_)) {
                tracing::error!("Failed to fetch record {}: {}", id, err);
            }
            Err(store_failure("Failed to fetch record.", &err))
        }
    }
}

pub async fn handle_check_record(
    Extension(store): Extension<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CheckResponse>), Failure> {
    match store.exists(&id) {
        Ok(value) => Ok((
            StatusCode::OK,
            Json(CheckResponse {
                status: Status::Success,
                exists: value.is_some(),
                value,
            }),
        )),
        Err(err) => {
            tracing::error!("Failed to check record {}: {}", id, err);
            Err(store_failure("Error checking record existence.", &err))
        }
    }
}

pub async fn handle_list_records(
    Extension(store): Extension<Arc<RecordStore>>,
) -> Result<(StatusCode, Json<ListResponse>), Failure> {
    match store.list_all() {
        Ok(records) => Ok((
            StatusCode::OK,
            Json(ListResponse {
                status: Status::Success,
                message: "All records retrieved successfully.".to_string(),
                count: records.len(),
                records,
            }),
        )),
        Err(err) => {
            tracing::error!("Failed to list records: {}", err);
            Err(store_failure("Failed to fetch records.", &err))
        }
    }
}

pub async fn handle_unmatched() -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            status: Status::Error,
            message: "Route not found".to_string(),
            error: None,
        }),
    )
}

fn required_fields(Json(request): Json<UpdateRequest>) -> Option<(String, String)> {
    match (request.id, request.value) {
        (Some(id), Some(value)) if !id.is_empty() && !value.is_empty() => Some((id, value)),
        _ => None,
    }
}

fn bad_request(message: &str) -> Failure {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            status: Status::Error,
            message: message.to_string(),
            error: None,
        }),
    )
}

/// Maps a store error onto the wire: invalid input is the caller's fault
/// (400), a missing record is its own category (404), anything the backend
/// broke is a 500 carrying `context` as the message.
fn store_failure(context: &str, err: &StoreError) -> Failure {
    match err {
        StoreError::InvalidArgument(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                status: Status::Error,
                message: err.to_string(),
                error: None,
            }),
        ),
        StoreError::NotFound(key) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                status: Status::NotFound,
                message: format!("No record found for ID: {}", key),
                error: None,
            }),
        ),
        StoreError::Unavailable(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                status: Status::Error,
                message: context.to_string(),
                error: Some(err.to_string()),
            }),
        ),
    }
}
