//! Event types for the BondTrack event system
//!
//! Events are broadcast over each service's SSE stream so the web UI can
//! reflect flow progress (e.g. the "verifying" status during a check-in)
//! without polling.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// BondTrack event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BondEvent {
    /// Identity verification started for a check-in submission
    VerificationStarted {
        client_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A check-in record was appended to the audit log
    CheckInRecorded {
        record_id: Uuid,
        client_id: Uuid,
        verified: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A check-in submission was rejected before any record was created
    CheckInRejected {
        client_id: Uuid,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl BondEvent {
    /// Event name used as the SSE event type
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::VerificationStarted { .. } => "VerificationStarted",
            Self::CheckInRecorded { .. } => "CheckInRecorded",
            Self::CheckInRejected { .. } => "CheckInRejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tags_type() {
        let event = BondEvent::CheckInRecorded {
            record_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            verified: true,
            timestamp: crate::time::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CheckInRecorded");
        assert_eq!(json["verified"], true);
    }

    #[test]
    fn test_event_name_matches_variant() {
        let event = BondEvent::VerificationStarted {
            client_id: Uuid::new_v4(),
            timestamp: crate::time::now(),
        };
        assert_eq!(event.event_name(), "VerificationStarted");
    }
}
