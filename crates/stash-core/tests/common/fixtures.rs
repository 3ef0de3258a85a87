//! Test fixture loading utilities

use std::path::PathBuf;

use stash_core::{Item, MemoryItemStore};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// The figures collection used across integration tests.
pub fn figures_store() -> MemoryItemStore {
    MemoryItemStore::open(&fixture_path("figures.json"))
        .unwrap_or_else(|e| panic!("Failed to load figures fixture: {}", e))
}

/// The three-item collection from the resolver examples.
pub fn example_items() -> Vec<Item> {
    vec![
        Item::new("1", "Goku", "Dragon Ball"),
        Item::new("2", "Luffy", "One Piece"),
        Item::new("3", "Vegeta", vec!["Dragon Ball".to_string(), "Super".to_string()]),
    ]
}

pub fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}
