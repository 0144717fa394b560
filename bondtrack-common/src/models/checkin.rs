//! Check-in record model
//!
//! A check-in record proves that a client confirmed location and identity at
//! a point in time. Records are immutable once created and are never deleted
//! (compliance audit trail); the log they live in is ordered newest-first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single check-in audit record
///
/// `verified` and `notes` are set exactly once, at creation time, from the
/// verification outcome. There is no update or delete path for a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRecord {
    /// Unique record identifier (generated at creation)
    pub id: Uuid,

    /// Client being checked in (many records per client)
    pub client_id: Uuid,

    /// Creation time (RFC 3339 over the wire)
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Latitude reported by the location acquirer
    pub latitude: f64,

    /// Longitude reported by the location acquirer
    pub longitude: f64,

    /// Captured selfie as an encoded image payload (data URL or base64)
    pub photo_data: String,

    /// Identity verification outcome
    pub verified: bool,

    /// Explanation populated only when `verified` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckInRecord {
    /// Create a new record with a generated ID and current timestamp
    pub fn new(
        client_id: Uuid,
        latitude: f64,
        longitude: f64,
        photo_data: String,
        verified: bool,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            timestamp: crate::time::now(),
            latitude,
            longitude,
            photo_data,
            verified,
            notes,
        }
    }
}
