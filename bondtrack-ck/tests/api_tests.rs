//! Integration tests for bondtrack-ck API endpoints
//!
//! Drives the axum router directly (no socket) and asserts on JSON bodies:
//! - Health endpoint
//! - Check-in submission: created record, duplicate guard, validation
//! - Audit log listing, full and per-client

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

use bondtrack_ck::directory::ClientDirectory;
use bondtrack_ck::store::CheckInLog;
use bondtrack_ck::verify::{AlwaysMatch, MatchOutcome, ScriptedMatcher};
use bondtrack_ck::{build_router, AppState, CkConfig};
use bondtrack_common::models::Client;

/// Test helper: state with one known client and an instant matcher
fn setup_state() -> (AppState, Client) {
    let client = Client::new("Marcus Webb", "/photos/marcus-webb.jpg");
    let directory = Arc::new(ClientDirectory::with_clients(vec![client.clone()]));
    let state = AppState::new(
        directory,
        Arc::new(CheckInLog::new()),
        Arc::new(AlwaysMatch::new(Duration::ZERO)),
        CkConfig {
            verify_pacing_ms: 0,
            ..CkConfig::default()
        },
    );
    (state, client)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn checkin_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/checkin")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn valid_body(client_id: Uuid) -> Value {
    json!({
        "client_id": client_id,
        "latitude": 35.7796,
        "longitude": -78.6382,
        "accuracy_m": 8.0,
        "photo_data": "data:image/png;base64,AAAA",
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (state, _) = setup_state();
    let app = build_router(state);

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "bondtrack-ck");
    assert!(body["version"].is_string());
}

// =============================================================================
// Check-in submission
// =============================================================================

#[tokio::test]
async fn test_submit_creates_record() {
    let (state, client) = setup_state();
    let app = build_router(state.clone());

    let response = app.oneshot(checkin_request(&valid_body(client.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["client_id"], client.id.to_string());
    assert_eq!(body["latitude"], 35.7796);
    assert_eq!(body["longitude"], -78.6382);
    assert_eq!(body["photo_data"], "data:image/png;base64,AAAA");
    assert_eq!(body["verified"], true);
    assert!(body.get("notes").is_none());

    assert_eq!(state.log.len().await, 1);
}

#[tokio::test]
async fn test_submit_negative_match_still_created() {
    let (state, client) = setup_state();
    let state = AppState {
        matcher: Arc::new(ScriptedMatcher::new(MatchOutcome::mismatch())),
        ..state
    };
    let app = build_router(state.clone());

    let response = app.oneshot(checkin_request(&valid_body(client.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["verified"], false);
    assert_eq!(body["notes"], "Face mismatch detected (Automated Check)");
    assert_eq!(state.log.len().await, 1);
}

#[tokio::test]
async fn test_submit_unknown_client_is_404() {
    let (state, _) = setup_state();
    let app = build_router(state.clone());

    let response = app.oneshot(checkin_request(&valid_body(Uuid::new_v4()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "CLIENT_NOT_FOUND");
    assert!(state.log.is_empty().await);
}

#[tokio::test]
async fn test_submit_missing_photo_is_400() {
    let (state, client) = setup_state();
    let app = build_router(state.clone());

    let mut body = valid_body(client.id);
    body["photo_data"] = json!("");
    let response = app.oneshot(checkin_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "NO_IMAGE_SELECTED");
    assert!(state.log.is_empty().await);
}

#[tokio::test]
async fn test_submit_out_of_range_latitude_is_400() {
    let (state, client) = setup_state();
    let app = build_router(state.clone());

    let mut body = valid_body(client.id);
    body["latitude"] = json!(123.4);
    let response = app.oneshot(checkin_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_LOCATION");
}

#[tokio::test]
async fn test_duplicate_submission_while_verifying_is_409() {
    let (state, client) = setup_state();

    // Simulate a verification call already in flight for this client
    state.in_flight.lock().await.insert(client.id);

    let app = build_router(state.clone());
    let response = app.oneshot(checkin_request(&valid_body(client.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "VERIFICATION_IN_FLIGHT");
    assert!(state.log.is_empty().await);
}

// =============================================================================
// Audit log listing
// =============================================================================

#[tokio::test]
async fn test_list_check_ins_newest_first() {
    let (state, client) = setup_state();

    for _ in 0..2 {
        let app = build_router(state.clone());
        let response = app.oneshot(checkin_request(&valid_body(client.id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = build_router(state.clone());
    let response = app.oneshot(get_request("/api/checkins")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    let first = records[0]["timestamp"].as_str().unwrap();
    let second = records[1]["timestamp"].as_str().unwrap();
    assert!(first >= second);
}

#[tokio::test]
async fn test_list_by_client_filters() {
    let (state, client) = setup_state();
    let other = Client::new("Dana Ortiz", "/photos/dana-ortiz.jpg");
    state.directory.insert(other.clone()).await;

    for id in [client.id, other.id, client.id] {
        let app = build_router(state.clone());
        let response = app.oneshot(checkin_request(&valid_body(id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = build_router(state.clone());
    let uri = format!("/api/checkins/{}", client.id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["client_id"] == client.id.to_string()));
}

#[tokio::test]
async fn test_list_by_unknown_client_is_404() {
    let (state, _) = setup_state();
    let app = build_router(state);

    let uri = format!("/api/checkins/{}", Uuid::new_v4());
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_clients() {
    let (state, client) = setup_state();
    let app = build_router(state);

    let response = app.oneshot(get_request("/api/clients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let clients = body.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], client.name);
}
