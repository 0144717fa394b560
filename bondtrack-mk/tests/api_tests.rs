//! Integration tests for bondtrack-mk API endpoints
//!
//! Drives the axum router with a scripted generator in place of the hosted
//! language model:
//! - Health endpoint
//! - Draft endpoint success and error mapping
//! - Campaign endpoint fan-out with per-channel failure reporting

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use bondtrack_mk::{build_router, AppState, GatewayError, TaskKind, TextGenerator};

/// Scripted generator standing in for the hosted model
enum Script {
    Echo,
    Fail(fn() -> GatewayError),
}

struct ScriptedGenerator(Script);

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, task: TaskKind, context: &str) -> Result<String, GatewayError> {
        match &self.0 {
            Script::Echo => Ok(format!("[{}] {}", task.as_str(), context)),
            Script::Fail(make) => Err(make()),
        }
    }
}

fn setup_app(script: Script) -> axum::Router {
    build_router(AppState::new(Arc::new(ScriptedGenerator(script))))
}

fn post_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(Script::Echo);

    let request = Request::builder().method("GET").uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "bondtrack-mk");
}

// =============================================================================
// Draft endpoint
// =============================================================================

#[tokio::test]
async fn test_draft_returns_generated_text() {
    let app = setup_app(Script::Echo);

    let body = json!({ "task": "document_draft", "context": "indemnitor agreement" });
    let response = app.oneshot(post_request("/api/draft", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["text"], "[document_draft] indemnitor agreement");
}

#[tokio::test]
async fn test_draft_maps_invalid_credential_to_401() {
    let app = setup_app(Script::Fail(|| GatewayError::InvalidCredential));

    let body = json!({ "task": "chat", "context": "hello" });
    let response = app.oneshot(post_request("/api/draft", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_draft_maps_service_unavailable_to_502() {
    let app = setup_app(Script::Fail(|| GatewayError::ServiceUnavailable("down".into())));

    let body = json!({ "task": "translation", "context": "hola" });
    let response = app.oneshot(post_request("/api/draft", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_draft_maps_empty_response_to_502() {
    let app = setup_app(Script::Fail(|| GatewayError::EmptyResponse));

    let body = json!({ "task": "marketing_copy", "context": "spring promo" });
    let response = app.oneshot(post_request("/api/draft", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "EMPTY_RESPONSE");
}

// =============================================================================
// Campaign endpoint
// =============================================================================

#[tokio::test]
async fn test_campaign_generates_all_channels() {
    let app = setup_app(Script::Echo);

    let body = json!({
        "subject": "24/7 bail assistance",
        "audience": "families of detainees",
        "channels": ["email", "sms", "social"],
    });
    let response = app.oneshot(post_request("/api/campaign", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["subject"], "24/7 bail assistance");
    let channels = body["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 3);
    assert!(channels.iter().all(|c| c["copy"].is_string()));
}

#[tokio::test]
async fn test_campaign_reports_failures_per_channel() {
    let app = setup_app(Script::Fail(|| GatewayError::ServiceUnavailable("down".into())));

    let body = json!({
        "subject": "reminder program",
        "audience": "active clients",
        "channels": ["email"],
    });
    let response = app.oneshot(post_request("/api/campaign", &body)).await.unwrap();
    // Per-channel failures do not fail the request
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let channels = body["channels"].as_array().unwrap();
    assert_eq!(channels[0]["error"], "SERVICE_UNAVAILABLE");
    assert!(channels[0].get("copy").is_none());
}
