//! Identity verification
//!
//! Decides whether a freshly captured selfie matches the client's stored
//! reference photo. The matcher is a seam: the current product wires in
//! `AlwaysMatch`, and a real face-matching backend can be swapped in without
//! touching the calling flow.
//!
//! A negative match is a *successful* call with `verified = false`; only a
//! failed call to the underlying service is an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::photo::PhotoPayload;

/// Note recorded on a negative match outcome
pub const MISMATCH_NOTE: &str = "Face mismatch detected (Automated Check)";

/// Default pacing delay so the UI's "verifying" status is perceptible
pub const DEFAULT_PACING: Duration = Duration::from_millis(1500);

/// Verification backend failure, kept separate from a negative match
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The matching service could not complete the call
    #[error("Verification service error: {0}")]
    Service(String),
}

/// Outcome of a face match call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Whether the captured photo matched the reference
    pub verified: bool,
    /// Explanation, populated only when `verified` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MatchOutcome {
    /// Positive match
    pub fn matched() -> Self {
        Self {
            verified: true,
            notes: None,
        }
    }

    /// Negative match with the standard note
    pub fn mismatch() -> Self {
        Self {
            verified: false,
            notes: Some(MISMATCH_NOTE.to_string()),
        }
    }
}

/// Face matching strategy
///
/// Implementations compare the stored reference photo against a newly
/// captured payload. The call is async with a noticeable duration - the
/// surrounding UI shows a "verifying" status while it runs.
#[async_trait]
pub trait FaceMatcher: Send + Sync {
    /// Matcher name for logging
    fn name(&self) -> &'static str;

    /// Compare the captured photo against the client's reference photo
    async fn match_faces(
        &self,
        reference_photo_url: &str,
        captured: &PhotoPayload,
    ) -> Result<MatchOutcome, VerificationError>;
}

/// Stand-in matcher that always verifies
///
/// Sleeps for a configurable pacing delay (a UX requirement, not a
/// technical one) and then reports a positive match.
#[derive(Debug, Clone)]
pub struct AlwaysMatch {
    pacing: Duration,
}

impl AlwaysMatch {
    pub fn new(pacing: Duration) -> Self {
        Self { pacing }
    }
}

impl Default for AlwaysMatch {
    fn default() -> Self {
        Self::new(DEFAULT_PACING)
    }
}

#[async_trait]
impl FaceMatcher for AlwaysMatch {
    fn name(&self) -> &'static str {
        "always-match"
    }

    async fn match_faces(
        &self,
        reference_photo_url: &str,
        _captured: &PhotoPayload,
    ) -> Result<MatchOutcome, VerificationError> {
        tracing::debug!(reference = reference_photo_url, "Simulated face match");
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
        Ok(MatchOutcome::matched())
    }
}

/// Matcher that returns a predetermined outcome
///
/// Used for manual QA of the negative-match path and in tests.
#[derive(Debug, Clone)]
pub struct ScriptedMatcher {
    outcome: MatchOutcome,
}

impl ScriptedMatcher {
    pub fn new(outcome: MatchOutcome) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl FaceMatcher for ScriptedMatcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn match_faces(
        &self,
        _reference_photo_url: &str,
        _captured: &PhotoPayload,
    ) -> Result<MatchOutcome, VerificationError> {
        Ok(self.outcome.clone())
    }
}
