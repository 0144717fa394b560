//! bondtrack-mk library - Marketing & Drafting service
//!
//! Wraps the hosted language model behind a typed gateway and exposes the
//! back office's text generation surface: document drafting, chat,
//! translation, and the fan-out marketing composer.

use std::sync::Arc;

use axum::Router;

pub mod api;
pub mod composer;
pub mod gateway;

pub use gateway::{GatewayError, LlmGateway, TaskKind, TextGenerator};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Wired text generator (the hosted LLM gateway in the current product)
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Create new application state
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/api/draft", post(api::draft))
        .route("/api/campaign", post(api::compose_campaign))
        .merge(api::health_routes())
        .with_state(state)
}
