//! Server-Sent Events for check-in flow status
//!
//! Streams `BondEvent`s (verification started / check-in recorded) so the
//! web UI can reflect flow progress live, with periodic heartbeats for
//! connection status.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

use crate::AppState;

/// GET /api/events - SSE stream of check-in lifecycle events
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to check-in events");

    let rx = state.subscribe_events();
    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(bond_event) => Event::default()
                .event(bond_event.event_name())
                .json_data(&bond_event)
                .ok()
                .map(Ok),
            Err(e) => {
                // Lagged receiver: log and continue
                warn!("SSE client error: {:?}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
