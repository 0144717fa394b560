//! Location acquisition
//!
//! Wraps the platform geolocation capability behind an async provider seam.
//! One position request per check-in attempt; a cached fix from before the
//! attempt started must not be reused. There is no retry backoff - retries
//! are user-initiated.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CkError, Result};

/// Bounded wait for a position fix before reporting `LocationTimeout`
pub const DEFAULT_LOCATION_WAIT: Duration = Duration::from_secs(10);

/// A single position reading from the location acquirer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Reported accuracy radius in meters
    pub accuracy_m: f64,
}

impl LocationFix {
    /// Validate and construct a fix from raw coordinate values
    pub fn new(latitude: f64, longitude: f64, accuracy_m: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CkError::InvalidLocation("coordinates must be finite".into()));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CkError::InvalidLocation(format!(
                "latitude out of range: {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CkError::InvalidLocation(format!(
                "longitude out of range: {}",
                longitude
            )));
        }
        if !accuracy_m.is_finite() || accuracy_m < 0.0 {
            return Err(CkError::InvalidLocation(format!(
                "accuracy out of range: {}",
                accuracy_m
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_m,
        })
    }
}

/// Source of position fixes
///
/// Implementations wrap whatever capability actually produces coordinates:
/// the browser's geolocation API reported through the HTTP layer, a fixed
/// kiosk position, or a future native device feed. `current_fix` must return
/// a fresh reading for the current attempt, never a cached position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Request the current position once
    async fn current_fix(&self) -> Result<LocationFix>;
}

/// Request a position from the provider, bounding the wait
///
/// Maps an expired wait to `LocationTimeout`; provider errors pass through
/// unchanged (`LocationUnavailable` / `LocationDenied`).
pub async fn acquire(provider: &dyn LocationProvider, wait: Duration) -> Result<LocationFix> {
    tracing::debug!(provider = provider.name(), wait_ms = wait.as_millis() as u64, "Requesting position fix");
    match tokio::time::timeout(wait, provider.current_fix()).await {
        Ok(result) => {
            if let Ok(fix) = &result {
                tracing::info!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    accuracy_m = fix.accuracy_m,
                    "Position fix acquired"
                );
            }
            result
        }
        Err(_) => Err(CkError::LocationTimeout),
    }
}

/// Provider that always returns one configured fix
///
/// Used for kiosk/demo deployments where the check-in terminal does not move.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    fix: LocationFix,
}

impl FixedLocationProvider {
    pub fn new(fix: LocationFix) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_fix(&self) -> Result<LocationFix> {
        Ok(self.fix)
    }
}
