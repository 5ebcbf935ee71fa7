//! In-memory implementation of RecordSource for demos and testing

use crate::core::{Record, RecordSource, Result, ViewError};
use crate::entities::{Complaint, Guest, Reservation, fixtures};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// In-memory record source
///
/// Hands out a snapshot of its records after a simulated network delay, and
/// can be told to fail instead. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryRecordSource<R> {
    records: Arc<RwLock<Vec<R>>>,
    latency: Duration,
    failure: Option<String>,
}

impl<R: Record> InMemoryRecordSource<R> {
    /// Create a source answering immediately
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            latency: Duration::ZERO,
            failure: None,
        }
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every fetch fail with a transport error
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Append a record to the source
    pub fn insert(&self, record: R) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| ViewError::Load(format!("Failed to acquire write lock: {}", e)))?;

        records.push(record);

        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| ViewError::Load(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.len())
    }
}

impl InMemoryRecordSource<Reservation> {
    /// Source serving the sample reservations
    pub fn reservations() -> Result<Self> {
        Ok(Self::new(fixtures::mock_reservations()?))
    }
}

impl InMemoryRecordSource<Complaint> {
    /// Source serving the sample complaints
    pub fn complaints() -> Result<Self> {
        Ok(Self::new(fixtures::mock_complaints()?))
    }
}

impl InMemoryRecordSource<Guest> {
    /// Source serving the sample guests
    pub fn guests() -> Result<Self> {
        Ok(Self::new(fixtures::mock_guests()?))
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for InMemoryRecordSource<R> {
    async fn fetch_all(&self) -> Result<Vec<R>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(ViewError::Load(message.clone()));
        }

        let records = self
            .records
            .read()
            .map_err(|e| ViewError::Load(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoadState, RecordStore};
    use std::time::Instant;

    #[tokio::test]
    async fn test_fetch_all_returns_fixtures_in_order() {
        let source = InMemoryRecordSource::reservations().unwrap();
        let records = source.fetch_all().await.unwrap();

        assert_eq!(records.len(), 13);
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let source = InMemoryRecordSource::guests()
            .unwrap()
            .with_latency(Duration::from_millis(20));
        assert_eq!(source.latency(), Duration::from_millis(20));

        let started = Instant::now();
        let guests = source.fetch_all().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(guests.len(), 3);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let source = InMemoryRecordSource::complaints()
            .unwrap()
            .failing("service unavailable");

        let err = source.fetch_all().await.unwrap_err();
        assert_eq!(err, ViewError::Load("service unavailable".to_string()));

        let store = RecordStore::<Complaint>::load(&source).await;
        assert!(store.is_empty());
        assert!(matches!(store.state(), LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_insert() {
        let source = InMemoryRecordSource::guests().unwrap();
        let mut extra = source.fetch_all().await.unwrap().remove(0);
        extra.id = 4;

        source.insert(extra).unwrap();

        assert_eq!(source.len().unwrap(), 4);
        assert_eq!(source.fetch_all().await.unwrap()[3].id, 4);
    }
}
