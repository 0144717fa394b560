//! Client model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Case status for a bonded client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Case open, client compliant
    Active,
    /// Failure to Appear - client missed a court date
    Fta,
    /// Case resolved
    Closed,
}

impl Default for CaseStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A bonded client tracked by the agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier
    pub id: Uuid,

    /// Full name
    pub name: String,

    /// Stored reference photo used by identity verification
    pub reference_photo_url: String,

    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Current case status
    #[serde(default)]
    pub case_status: CaseStatus,
}

impl Client {
    /// Create a new client with a generated ID
    pub fn new(name: impl Into<String>, reference_photo_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            reference_photo_url: reference_photo_url.into(),
            phone: None,
            case_status: CaseStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_status_serializes_snake_case() {
        let json = serde_json::to_value(CaseStatus::Fta).unwrap();
        assert_eq!(json, "fta");
    }

    #[test]
    fn test_new_client_defaults_active() {
        let client = Client::new("Jordan Reyes", "/photos/jordan.jpg");
        assert_eq!(client.case_status, CaseStatus::Active);
        assert!(client.phone.is_none());
    }
}
