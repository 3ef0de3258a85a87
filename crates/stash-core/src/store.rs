use crate::item::{Item, ItemId};

/// Read-only access to the backing item collection.
///
/// Implementations own any indexing scheme. The resolver relies on the
/// indexed lookups for speed only; correctness never depends on them.
pub trait ItemGateway: Send + Sync {
    /// Every item in the collection, in the store's stable order.
    fn fetch_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Items whose lowercased name starts with `prefix`.
    ///
    /// `prefix` is expected to be lowercase already.
    fn fetch_by_name_prefix(&self, prefix: &str) -> Result<Vec<Item>, StoreError>;

    /// Items whose series contains exactly `label` (case-sensitive).
    fn fetch_by_series(&self, label: &str) -> Result<Vec<Item>, StoreError>;

    /// Look up a single item.
    fn fetch_by_id(&self, id: &str) -> Result<Option<Item>, StoreError>;
}

/// Errors from an item store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Item already exists: {0}")]
    AlreadyExists(ItemId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed document: {0}")]
    Document(String),
}
