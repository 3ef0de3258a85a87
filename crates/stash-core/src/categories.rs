//! Category list for filter menus.

use std::collections::HashSet;

use crate::collation::compare_labels;
use crate::item::Item;

/// Every distinct, trimmed, non-empty series label across `items`, sorted
/// ascending.
///
/// Pass the unfiltered collection: the menu should not shrink while a search
/// is active.
pub fn build_categories(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories: Vec<String> = items
        .iter()
        .flat_map(|item| item.series().labels())
        .map(|label| label.trim())
        .filter(|label| !label.is_empty() && seen.insert(*label))
        .map(str::to_string)
        .collect();
    categories.sort_by(|a, b| compare_labels(a, b));
    categories
}
