//! bondtrack-ck library - Check-In Verification service
//!
//! Hosts the check-in flow for the BondTrack back office: geolocation
//! acquisition, selfie capture, identity verification, and the append-only
//! compliance audit log, exposed over a JSON HTTP API with an SSE status
//! stream.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use bondtrack_common::events::BondEvent;

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod flow;
pub mod location;
pub mod photo;
pub mod store;
pub mod verify;

pub use config::CkConfig;
pub use error::{CkError, Result};

use directory::ClientDirectory;
use store::CheckInLog;
use verify::FaceMatcher;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client directory (reference photos, case status)
    pub directory: Arc<ClientDirectory>,
    /// Append-only check-in audit log
    pub log: Arc<CheckInLog>,
    /// Wired face matcher (AlwaysMatch in the current product)
    pub matcher: Arc<dyn FaceMatcher>,
    /// Clients with a verification call currently in flight
    pub in_flight: Arc<Mutex<HashSet<Uuid>>>,
    /// Event broadcaster for SSE
    pub event_tx: broadcast::Sender<BondEvent>,
    /// Flow tunables
    pub config: CkConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(
        directory: Arc<ClientDirectory>,
        log: Arc<CheckInLog>,
        matcher: Arc<dyn FaceMatcher>,
        config: CkConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100); // Buffer up to 100 events
        Self {
            directory,
            log,
            matcher,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            event_tx,
            config,
        }
    }

    /// Broadcast an event to all SSE listeners
    pub fn broadcast_event(&self, event: BondEvent) {
        // Ignore send errors (no receivers is OK)
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<BondEvent> {
        self.event_tx.subscribe()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/clients", get(api::list_clients))
        .route("/api/checkin", post(api::submit_check_in))
        .route("/api/checkins", get(api::list_check_ins))
        .route("/api/checkins/:client_id", get(api::list_client_check_ins))
        .route("/api/events", get(api::event_stream))
        .merge(api::health_routes())
        .with_state(state)
}
