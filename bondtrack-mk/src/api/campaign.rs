//! Marketing campaign endpoint

use axum::{extract::State, Json};

use crate::composer::{self, Campaign, CampaignBrief};
use crate::AppState;

/// POST /api/campaign
///
/// Compose a campaign: copy for every requested channel is generated
/// concurrently and awaited together. Per-channel failures are reported in
/// the response body, so the overall call succeeds even when a channel
/// does not.
pub async fn compose_campaign(
    State(state): State<AppState>,
    Json(brief): Json<CampaignBrief>,
) -> Json<Campaign> {
    Json(composer::compose(state.generator.as_ref(), &brief).await)
}
