//! Check-in submission and audit log endpoints
//!
//! The browser performs location acquisition and photo capture; this layer
//! receives both, runs the verification flow, and appends the audit record.
//! Submission is one-shot per attempt: a duplicate POST for the same client
//! while verification is in flight gets `409 Conflict` and no second record.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bondtrack_common::events::BondEvent;
use bondtrack_common::models::CheckInRecord;
use bondtrack_common::time;

use crate::error::CkError;
use crate::flow::CheckInAttempt;
use crate::location::LocationFix;
use crate::photo::PhotoPayload;
use crate::AppState;

/// POST /api/checkin request body
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub client_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy radius reported by the browser's geolocation API
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    pub photo_data: String,
}

/// Error payload for rejected submissions
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    fn from_ck(err: &CkError) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

fn error_status(err: &CkError) -> StatusCode {
    match err {
        CkError::VerificationInFlight | CkError::AlreadySubmitted => StatusCode::CONFLICT,
        CkError::ClientNotFound(_) => StatusCode::NOT_FOUND,
        CkError::Verification(_) => StatusCode::BAD_GATEWAY,
        CkError::InvalidRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn reject(err: CkError) -> (StatusCode, Json<ErrorResponse>) {
    (error_status(&err), Json(ErrorResponse::from_ck(&err)))
}

/// POST /api/checkin
///
/// Validates the submitted location and photo, verifies identity, and
/// appends a new record at the head of the client's log. Responds
/// `201 Created` with the record; a negative match is still a created
/// record, not an error.
pub async fn submit_check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<CheckInRecord>), (StatusCode, Json<ErrorResponse>)> {
    let client = state
        .directory
        .get(req.client_id)
        .await
        .ok_or_else(|| reject(CkError::ClientNotFound(req.client_id)))?;

    let fix = LocationFix::new(req.latitude, req.longitude, req.accuracy_m.unwrap_or(0.0))
        .map_err(reject)?;
    let photo = PhotoPayload::parse(&req.photo_data).map_err(reject)?;

    // One-shot guard: only one verification in flight per client.
    {
        let mut in_flight = state.in_flight.lock().await;
        if !in_flight.insert(client.id) {
            warn!(client_id = %client.id, "Duplicate check-in submission while verifying");
            return Err(reject(CkError::VerificationInFlight));
        }
    }

    state.broadcast_event(BondEvent::VerificationStarted {
        client_id: client.id,
        timestamp: time::now(),
    });

    let mut attempt = CheckInAttempt::new(client.id);
    let result = async {
        attempt.set_location(fix)?;
        attempt.attach_photo(photo)?;
        attempt.submit(&client, state.matcher.as_ref(), &state.log).await
    }
    .await;

    state.in_flight.lock().await.remove(&client.id);

    match result {
        Ok(record) => {
            state.broadcast_event(BondEvent::CheckInRecorded {
                record_id: record.id,
                client_id: record.client_id,
                verified: record.verified,
                timestamp: time::now(),
            });
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            info!(client_id = %client.id, error = %e, "Check-in submission rejected");
            state.broadcast_event(BondEvent::CheckInRejected {
                client_id: client.id,
                reason: e.code().to_string(),
                timestamp: time::now(),
            });
            Err(reject(e))
        }
    }
}

/// GET /api/checkins
///
/// Full audit log, newest-first.
pub async fn list_check_ins(State(state): State<AppState>) -> Json<Vec<CheckInRecord>> {
    Json(state.log.list_all().await)
}

/// GET /api/checkins/:client_id
///
/// One client's check-in history, newest-first.
pub async fn list_client_check_ins(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<CheckInRecord>>, (StatusCode, Json<ErrorResponse>)> {
    if state.directory.get(client_id).await.is_none() {
        return Err(reject(CkError::ClientNotFound(client_id)));
    }
    Ok(Json(state.log.list_by_client(client_id).await))
}
