//! Catalog query resolution for the stash collectibles browser.
//!
//! A [`QueryResolver`] turns a search term, a field scope, a category filter
//! and a sort spec into an ordered, deduplicated list of [`Item`]s, reading
//! from any [`ItemGateway`].

pub mod categories;
pub mod collation;
pub mod config;
pub mod error;
pub mod item;
pub mod memory_store;
pub mod query;
pub mod resolver;
pub mod sort;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sql_query;
#[cfg(feature = "sqlite")]
pub mod sqlite_store;

pub use categories::build_categories;
pub use config::*;
pub use error::*;
pub use item::*;
pub use memory_store::MemoryItemStore;
pub use query::*;
pub use resolver::*;
pub use sort::order;
pub use store::*;

#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteItemStore;
