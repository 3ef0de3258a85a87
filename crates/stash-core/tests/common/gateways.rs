//! Gateway doubles.

use std::sync::Mutex;

use stash_core::{Item, ItemGateway, MemoryItemStore, StoreError};

/// A gateway whose every call fails, like an unreachable store.
pub struct FailingGateway;

impl ItemGateway for FailingGateway {
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError> {
        Err(StoreError::Storage("connection refused".into()))
    }

    fn fetch_by_name_prefix(&self, _prefix: &str) -> Result<Vec<Item>, StoreError> {
        Err(StoreError::Storage("connection refused".into()))
    }

    fn fetch_by_series(&self, _label: &str) -> Result<Vec<Item>, StoreError> {
        Err(StoreError::Storage("connection refused".into()))
    }

    fn fetch_by_id(&self, _id: &str) -> Result<Option<Item>, StoreError> {
        Err(StoreError::Storage("connection refused".into()))
    }
}

/// Wraps a memory store and records every call in order.
pub struct RecordingGateway {
    inner: MemoryItemStore,
    calls: Mutex<Vec<String>>,
}

impl RecordingGateway {
    pub fn new(inner: MemoryItemStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ItemGateway for RecordingGateway {
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError> {
        self.record("all".into());
        self.inner.fetch_all()
    }

    fn fetch_by_name_prefix(&self, prefix: &str) -> Result<Vec<Item>, StoreError> {
        self.record(format!("prefix:{}", prefix));
        self.inner.fetch_by_name_prefix(prefix)
    }

    fn fetch_by_series(&self, label: &str) -> Result<Vec<Item>, StoreError> {
        self.record(format!("series:{}", label));
        self.inner.fetch_by_series(label)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.record(format!("id:{}", id));
        self.inner.fetch_by_id(id)
    }
}

/// Returns every item from the membership lookup, as a sloppy index might.
pub struct OverbroadSeriesGateway(pub MemoryItemStore);

impl ItemGateway for OverbroadSeriesGateway {
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError> {
        self.0.fetch_all()
    }

    fn fetch_by_name_prefix(&self, prefix: &str) -> Result<Vec<Item>, StoreError> {
        self.0.fetch_by_name_prefix(prefix)
    }

    fn fetch_by_series(&self, _label: &str) -> Result<Vec<Item>, StoreError> {
        self.0.fetch_all()
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.0.fetch_by_id(id)
    }
}
