//! Record sources and the per-view record store

use crate::core::error::Result;
use crate::core::record::Record;
use async_trait::async_trait;

/// Supplier of the records of one view
///
/// Implement this trait for anything able to hand over the complete record
/// sequence at mount time. The store never asks twice.
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Fetch every record, in source order
    ///
    /// # Errors
    /// Returns [`ViewError::Load`](crate::core::ViewError::Load) when the transport fails.
    async fn fetch_all(&self) -> Result<Vec<R>>;
}

/// Loading state of a record store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    Loading,
    /// Records are available
    Ready,
    /// The source failed; the store is empty
    Failed(String),
}

/// In-memory ordered sequence of records backing one view
///
/// Populated once, then read by the pipeline without ever being mutated.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    state: LoadState,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            state: LoadState::Loading,
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// An empty store that has not loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A ready store holding the given records
    pub fn from_records(records: Vec<R>) -> Self {
        Self {
            records,
            state: LoadState::Ready,
        }
    }

    /// Populate the store from a source
    ///
    /// A failure is recorded in the store state rather than returned, so the
    /// view can render its loading-failed state over an empty store.
    pub async fn load(source: &dyn RecordSource<R>) -> Self {
        match Self::try_load(source).await {
            Ok(store) => store,
            Err(e) => Self {
                records: Vec::new(),
                state: LoadState::Failed(e.to_string()),
            },
        }
    }

    /// Like [`load`](Self::load) but surfaces the failure
    pub async fn try_load(source: &dyn RecordSource<R>) -> Result<Self> {
        tracing::debug!(resource = R::resource_name(), "loading records");

        match source.fetch_all().await {
            Ok(records) => {
                tracing::info!(
                    resource = R::resource_name(),
                    count = records.len(),
                    "records loaded"
                );
                Ok(Self::from_records(records))
            }
            Err(e) => {
                tracing::warn!(resource = R::resource_name(), error = %e, "failed to load records");
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Look a record up by id
    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ViewError;
    use crate::core::record::test_support::{Item, items};

    struct Fixed(Vec<Item>);

    #[async_trait]
    impl RecordSource<Item> for Fixed {
        async fn fetch_all(&self) -> Result<Vec<Item>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    #[async_trait]
    impl RecordSource<Item> for Broken {
        async fn fetch_all(&self) -> Result<Vec<Item>> {
            Err(ViewError::Load("connection reset".to_string()))
        }
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = RecordStore::<Item>::new();
        assert_eq!(store.state(), &LoadState::Loading);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_ready() {
        let store = RecordStore::<Item>::load(&Fixed(items())).await;
        assert!(store.is_ready());
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(4).map(|r| r.name.as_str()), Some("Shelf"));
        assert!(store.get(99).is_none());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_empty() {
        let store = RecordStore::<Item>::load(&Broken).await;
        assert!(store.is_empty());
        assert_eq!(
            store.state(),
            &LoadState::Failed("failed to load records: connection reset".to_string())
        );
    }

    #[test]
    fn test_load_from_sync_context() {
        let store = tokio_test::block_on(RecordStore::<Item>::load(&Fixed(Vec::new())));
        assert!(store.is_ready());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_try_load_surfaces_error() {
        let err = RecordStore::<Item>::try_load(&Broken).await.unwrap_err();
        assert_eq!(err.error_code(), "LOAD_FAILED");
    }
}
