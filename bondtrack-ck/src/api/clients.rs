//! Client directory endpoints

use axum::{extract::State, Json};

use bondtrack_common::models::Client;

use crate::AppState;

/// GET /api/clients
///
/// List directory entries, sorted by name.
pub async fn list_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    Json(state.directory.list().await)
}
