//! End-to-End HTTP Tests
//!
//! Boots the full router on an ephemeral port and drives it with a plain
//! HTTP client, the way an external caller would. Covers the wire contract
//! for every route and the durable backend across a process-style restart.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::task::JoinHandle;

use record_store::gateway;
use record_store::store::service::RecordStore;

async fn serve(store: RecordStore) -> (SocketAddr, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = gateway::router(Arc::new(store));

    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, server)
}

#[tokio::test]
async fn test_full_scenario_over_http() {
    let (addr, server) = serve(RecordStore::in_memory()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    // Liveness marker.
    let response = client.get(&base).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Backend is running and healthy.");

    // First upsert creates.
    let response = client
        .post(format!("{}/update", base))
        .json(&json!({ "id": "u1", "value": "alpha" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "New record created.");
    assert_eq!(body["data"]["id"], "u1");
    assert_eq!(body["data"]["value"], "alpha");

    // Second upsert on the same key updates in place.
    let response = client
        .post(format!("{}/update", base))
        .json(&json!({ "id": "u1", "value": "beta" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Record updated successfully.");
    assert_eq!(body["data"]["value"], "beta");

    // Point lookup reflects the update.
    let response = client
        .get(format!("{}/record/u1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], "u1");
    assert_eq!(body["data"]["value"], "beta");

    // Existence check carries the value when present.
    let body: Value = client
        .get(format!("{}/check/u1", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["exists"], true);
    assert_eq!(body["value"], "beta");

    // And stays 200 without the value when absent.
    let response = client
        .get(format!("{}/check/missing", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["exists"], false);
    assert!(body.get("value").is_none());

    // Enumeration sees exactly one record.
    let body: Value = client
        .get(format!("{}/records", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "All records retrieved successfully.");
    assert_eq!(body["count"], 1);
    assert_eq!(body["records"]["u1"], "beta");

    server.abort();
}

#[tokio::test]
async fn test_error_surfaces_over_http() {
    let (addr, server) = serve(RecordStore::in_memory()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    // Missing field gets the gateway's own 400 envelope.
    let response = client
        .post(format!("{}/update", base))
        .json(&json!({ "id": "only-key" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing 'id' or 'value' in request body.");

    // Malformed JSON lands on the same envelope, not an extractor reject.
    let response = client
        .post(format!("{}/update", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Missing 'id' or 'value' in request body.");

    // Absent record is a hard 404 on the point lookup.
    let response = client
        .get(format!("{}/record/ghost", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["message"], "No record found for ID: ghost");

    // Unmatched routes share the error envelope.
    let response = client
        .get(format!("{}/definitely/not/a/route", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");

    server.abort();
}

#[tokio::test]
async fn test_cross_origin_callers_are_allowed() {
    let (addr, server) = serve(RecordStore::in_memory()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    // A browser page on another origin gets the allow-all marker back.
    let response = client
        .get(format!("{}/records", base))
        .header("origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    // Preflight is answered by the gateway itself, before any route runs.
    let response = client
        .request(reqwest::Method::OPTIONS, format!("{}/update", base))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("access-control-allow-origin"));
    assert!(response.headers().contains_key("access-control-allow-methods"));

    server.abort();
}

#[tokio::test]
async fn test_durable_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let client = reqwest::Client::new();

    let (addr, server) = serve(RecordStore::durable(dir.path()).unwrap()).await;
    client
        .post(format!("http://{}/update", addr))
        .json(&json!({ "id": "u1", "value": "persisted" }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    server.abort();
    let _ = server.await;

    // A new server generation on the same directory sees the record.
    let (addr, server) = serve(RecordStore::durable(dir.path()).unwrap()).await;
    let body: Value = client
        .get(format!("http://{}/record/u1", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["value"], "persisted");

    server.abort();
}
