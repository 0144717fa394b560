//! Text drafting endpoint
//!
//! Single request/response wrapper over the gateway. No automatic retry:
//! a failed call is surfaced with its code and the user re-submits.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::{GatewayError, TaskKind};
use crate::AppState;

/// POST /api/draft request body
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub task: TaskKind,
    pub context: String,
}

/// Successful draft response
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub text: String,
}

/// Error payload for failed gateway calls
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub(crate) fn gateway_error_response(err: &GatewayError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        GatewayError::InvalidCredential => StatusCode::UNAUTHORIZED,
        GatewayError::ServiceUnavailable(_) | GatewayError::EmptyResponse => {
            StatusCode::BAD_GATEWAY
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.code().to_string(),
            message: err.to_string(),
        }),
    )
}

/// POST /api/draft
///
/// Generate text for one task from free-text context.
pub async fn draft(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.generator.generate(req.task, &req.context).await {
        Ok(text) => Ok(Json(DraftResponse { text })),
        Err(e) => {
            warn!(task = req.task.as_str(), error = %e, "Draft generation failed");
            Err(gateway_error_response(&e))
        }
    }
}
