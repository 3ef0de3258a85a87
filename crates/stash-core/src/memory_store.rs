use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;

use crate::item::{Item, ItemDocument};
use crate::store::{ItemGateway, StoreError};

/// In-memory item store.
///
/// Holds the whole collection in load order and answers every lookup by
/// scanning it. Suited to small catalogs and to tests.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<Item>>,
}

/// The two export shapes a document collection comes in.
#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionExport {
    /// `[{"id": "...", "name": ...}, ...]`
    Documents(Vec<ItemDocument>),
    /// `{"<id>": {"name": ...}, ...}`
    Keyed(BTreeMap<String, ItemDocument>),
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-normalized items.
    pub fn with_items(items: Vec<Item>) -> Result<Self, StoreError> {
        let store = Self::new();
        store.insert_batch(items)?;
        Ok(store)
    }

    /// Parse a JSON collection export.
    ///
    /// Array documents without an `id` get a fresh UUID. A repeated id makes
    /// the export malformed.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let export: CollectionExport =
            serde_json::from_str(json).map_err(|e| StoreError::Document(e.to_string()))?;
        let items = match export {
            CollectionExport::Documents(docs) => docs
                .into_iter()
                .map(|mut doc| {
                    let id = doc
                        .id
                        .take()
                        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                    Item::from_document(id, doc)
                })
                .collect(),
            CollectionExport::Keyed(docs) => docs
                .into_iter()
                .map(|(id, doc)| Item::from_document(id, doc))
                .collect(),
        };
        Self::with_items(items).map_err(|e| match e {
            StoreError::AlreadyExists(id) => StoreError::Document(format!("duplicate id: {}", id)),
            other => other,
        })
    }

    /// Load a JSON collection export from disk.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Storage(format!("read {}: {}", path.display(), e)))?;
        let store = Self::from_json(&json)?;
        tracing::debug!("Loaded {} items from {:?}", store.len(), path);
        Ok(store)
    }

    pub fn insert(&self, item: Item) -> Result<(), StoreError> {
        self.insert_batch(vec![item])
    }

    /// Append items; fails without inserting anything if an id is taken.
    pub fn insert_batch(&self, items: Vec<Item>) -> Result<(), StoreError> {
        let mut guard = self
            .items
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let mut ids: HashSet<&str> = guard.iter().map(|i| i.id.as_str()).collect();
        for item in &items {
            if !ids.insert(item.id.as_str()) {
                return Err(StoreError::AlreadyExists(item.id.clone()));
            }
        }
        guard.extend(items);
        Ok(())
    }

    pub fn len(&self) -> usize {
        match self.items.read() {
            Ok(items) => items.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn scan(&self, keep: impl Fn(&Item) -> bool) -> Result<Vec<Item>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(items.iter().filter(|item| keep(item)).cloned().collect())
    }
}

impl ItemGateway for MemoryItemStore {
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError> {
        self.scan(|_| true)
    }

    fn fetch_by_name_prefix(&self, prefix: &str) -> Result<Vec<Item>, StoreError> {
        self.scan(|item| item.name_lower().starts_with(prefix))
    }

    fn fetch_by_series(&self, label: &str) -> Result<Vec<Item>, StoreError> {
        self.scan(|item| item.series().contains(label))
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.scan(|item| item.id == id)?.into_iter().next())
    }
}
