//! Check-in submission flow
//!
//! One `CheckInAttempt` per check-in. Location and photo are collected
//! independently and gate the submit action; on submit the matcher runs,
//! the record is built (verification outcome set exactly once) and appended
//! to the audit log, and the attempt reaches its terminal phase.
//!
//! Submission is one-shot: a second submit while verification is in flight
//! or after completion is rejected without touching the store. A failed
//! location or verification step leaves the attempt collecting, so the user
//! can retry that step without recapturing the rest.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bondtrack_common::models::{CheckInRecord, Client};
use bondtrack_common::time;

use crate::error::{CkError, Result};
use crate::location::{self, LocationFix, LocationProvider};
use crate::photo::PhotoPayload;
use crate::store::CheckInLog;
use crate::verify::FaceMatcher;

/// Lifecycle phase of a check-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    /// Gathering location and photo; submit not yet accepted
    Collecting,
    /// Submit accepted, verification call in flight
    Verifying,
    /// Record appended; attempt is finished
    Completed,
}

/// A single check-in attempt for one client
#[derive(Debug)]
pub struct CheckInAttempt {
    client_id: Uuid,
    started_at: DateTime<Utc>,
    location: Option<LocationFix>,
    photo: Option<PhotoPayload>,
    phase: AttemptPhase,
}

impl CheckInAttempt {
    /// Begin a new attempt for a client
    pub fn new(client_id: Uuid) -> Self {
        Self {
            client_id,
            started_at: time::now(),
            location: None,
            photo: None,
            phase: AttemptPhase::Collecting,
        }
    }

    /// When the attempt began
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    /// Both inputs present, submit would be accepted
    pub fn is_ready(&self) -> bool {
        self.phase == AttemptPhase::Collecting && self.location.is_some() && self.photo.is_some()
    }

    /// Request a fresh position fix from the provider and record it
    ///
    /// A failed request leaves any previously acquired fix untouched; the
    /// user retries by calling this again.
    pub async fn acquire_location(
        &mut self,
        provider: &dyn LocationProvider,
        wait: Duration,
    ) -> Result<LocationFix> {
        self.ensure_collecting()?;
        let fix = location::acquire(provider, wait).await?;
        self.location = Some(fix);
        Ok(fix)
    }

    /// Record a position fix acquired elsewhere (e.g. by the browser)
    pub fn set_location(&mut self, fix: LocationFix) -> Result<()> {
        self.ensure_collecting()?;
        self.location = Some(fix);
        Ok(())
    }

    /// Attach the captured selfie, replacing any earlier capture
    pub fn attach_photo(&mut self, photo: PhotoPayload) -> Result<()> {
        self.ensure_collecting()?;
        self.photo = Some(photo);
        Ok(())
    }

    /// Discard the captured selfie so a new one can be taken
    pub fn discard_photo(&mut self) {
        self.photo = None;
    }

    /// Submit the attempt: verify identity, then append the audit record
    ///
    /// A negative match is a normal completion - the record carries
    /// `verified = false` and the matcher's note. Only a verification
    /// *service* failure is an error, and it returns the attempt to the
    /// collecting phase so the user can retry without recapturing.
    pub async fn submit(
        &mut self,
        client: &Client,
        matcher: &dyn FaceMatcher,
        log: &CheckInLog,
    ) -> Result<CheckInRecord> {
        match self.phase {
            AttemptPhase::Collecting => {}
            AttemptPhase::Verifying => return Err(CkError::VerificationInFlight),
            AttemptPhase::Completed => return Err(CkError::AlreadySubmitted),
        }

        let fix = self.location.ok_or(CkError::Incomplete("location not acquired"))?;
        let photo = self.photo.as_ref().ok_or(CkError::NoImageSelected)?;

        self.phase = AttemptPhase::Verifying;
        tracing::info!(
            client_id = %self.client_id,
            matcher = matcher.name(),
            "Verifying check-in identity"
        );

        let outcome = match matcher.match_faces(&client.reference_photo_url, photo).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // Service failure: allow a user-initiated retry without
                // recapturing photo or location.
                self.phase = AttemptPhase::Collecting;
                return Err(e.into());
            }
        };

        let record = CheckInRecord::new(
            self.client_id,
            fix.latitude,
            fix.longitude,
            photo.as_str().to_string(),
            outcome.verified,
            outcome.notes,
        );

        if let Err(e) = log.append(record.clone()).await {
            self.phase = AttemptPhase::Collecting;
            return Err(e);
        }

        self.phase = AttemptPhase::Completed;
        tracing::info!(
            client_id = %self.client_id,
            record_id = %record.id,
            verified = record.verified,
            "Check-in recorded"
        );
        Ok(record)
    }

    fn ensure_collecting(&self) -> Result<()> {
        match self.phase {
            AttemptPhase::Collecting => Ok(()),
            AttemptPhase::Verifying => Err(CkError::VerificationInFlight),
            AttemptPhase::Completed => Err(CkError::AlreadySubmitted),
        }
    }
}
