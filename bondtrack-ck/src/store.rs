//! Check-in log store
//!
//! Append-only in-memory collection of check-in records, newest-first.
//! Records are immutable and never deleted (compliance audit trail); the
//! only mutation is `append`, called by the submit action. An explicit
//! store object (no ambient singleton) so tests can instantiate isolated
//! stores.

use tokio::sync::RwLock;
use uuid::Uuid;

use bondtrack_common::models::CheckInRecord;

use crate::error::{CkError, Result};

/// Append-only audit log of check-in records
#[derive(Debug, Default)]
pub struct CheckInLog {
    /// Records ordered newest-first
    records: RwLock<Vec<CheckInRecord>>,
}

impl CheckInLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the head of the log
    ///
    /// Validates only that required fields are present; the record content
    /// was produced by the flow and is stored as-is.
    pub async fn append(&self, record: CheckInRecord) -> Result<()> {
        if record.client_id.is_nil() {
            return Err(CkError::InvalidRecord("client_id is required".into()));
        }
        if !record.latitude.is_finite() || !record.longitude.is_finite() {
            return Err(CkError::InvalidRecord("coordinates are required".into()));
        }
        if record.photo_data.is_empty() {
            return Err(CkError::InvalidRecord("photo payload is required".into()));
        }

        tracing::info!(
            record_id = %record.id,
            client_id = %record.client_id,
            verified = record.verified,
            "Appending check-in record"
        );

        let mut records = self.records.write().await;
        records.insert(0, record);
        Ok(())
    }

    /// All records, newest-first
    pub async fn list_all(&self) -> Vec<CheckInRecord> {
        self.records.read().await.clone()
    }

    /// Records for one client, newest-first
    pub async fn list_by_client(&self, client_id: Uuid) -> Vec<CheckInRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect()
    }

    /// Number of records in the log
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the log holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(client_id: Uuid) -> CheckInRecord {
        CheckInRecord::new(client_id, 35.7796, -78.6382, "data:image/png;base64,AAAA".into(), true, None)
    }

    #[tokio::test]
    async fn test_append_inserts_at_head() {
        let log = CheckInLog::new();
        let client = Uuid::new_v4();

        let first = record(client);
        let second = record(client);
        log.append(first.clone()).await.unwrap();
        log.append(second.clone()).await.unwrap();

        let all = log.list_all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_list_by_client_filters_and_preserves_order() {
        let log = CheckInLog::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let r1 = record(a);
        let r2 = record(b);
        let r3 = record(a);
        log.append(r1.clone()).await.unwrap();
        log.append(r2).await.unwrap();
        log.append(r3.clone()).await.unwrap();

        let for_a = log.list_by_client(a).await;
        assert_eq!(for_a.len(), 2);
        assert_eq!(for_a[0].id, r3.id);
        assert_eq!(for_a[1].id, r1.id);

        // Subset of list_all in the same relative order
        let all = log.list_all().await;
        let ids_in_all: Vec<_> = all.iter().filter(|r| r.client_id == a).map(|r| r.id).collect();
        let ids_for_a: Vec<_> = for_a.iter().map(|r| r.id).collect();
        assert_eq!(ids_in_all, ids_for_a);
    }

    #[tokio::test]
    async fn test_append_rejects_missing_fields() {
        let log = CheckInLog::new();

        let mut bad = record(Uuid::new_v4());
        bad.photo_data = String::new();
        assert!(matches!(log.append(bad).await, Err(CkError::InvalidRecord(_))));

        let nil_client = record(Uuid::nil());
        assert!(matches!(log.append(nil_client).await, Err(CkError::InvalidRecord(_))));

        assert!(log.is_empty().await);
    }
}
