use crate::store::StoreError;

/// Errors surfaced to callers of the resolver.
///
/// A missing item is not an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}
