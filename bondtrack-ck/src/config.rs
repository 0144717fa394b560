//! Check-in service configuration

use std::time::Duration;

use bondtrack_common::time::millis_to_duration;

/// Tunables for the check-in flow
#[derive(Debug, Clone, Copy)]
pub struct CkConfig {
    /// Pacing delay for the simulated verification call, milliseconds
    ///
    /// Keeps the UI's "verifying" status perceptible; not a technical wait.
    pub verify_pacing_ms: u64,

    /// Bounded wait for a position fix, seconds
    pub location_wait_secs: u64,
}

impl CkConfig {
    /// Verification pacing as a duration
    pub fn verify_pacing(&self) -> Duration {
        millis_to_duration(self.verify_pacing_ms)
    }

    /// Location wait bound as a duration
    pub fn location_wait(&self) -> Duration {
        Duration::from_secs(self.location_wait_secs)
    }
}

impl Default for CkConfig {
    fn default() -> Self {
        Self {
            verify_pacing_ms: 1500,
            location_wait_secs: 10,
        }
    }
}
