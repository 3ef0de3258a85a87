//! Ordering of resolved items.

use crate::collation::CollationKey;
use crate::item::Item;
use crate::query::{Direction, SortKey, SortSpec};

/// Order items by the given spec.
///
/// The sort is stable in both directions: items that compare equal keep
/// their relative input order. `SortKey::None` returns the input unchanged.
pub fn order(items: Vec<Item>, sort: SortSpec) -> Vec<Item> {
    if sort.key == SortKey::None {
        return items;
    }

    let mut keyed: Vec<(CollationKey, Item)> = items
        .into_iter()
        .map(|item| (CollationKey::new(sort_field(&item, sort.key)), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match sort.direction {
        Direction::Ascending => a.cmp(b),
        Direction::Descending => b.cmp(a),
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

fn sort_field(item: &Item, key: SortKey) -> &str {
    match key {
        SortKey::Series => item.primary_series(),
        SortKey::Name | SortKey::None => item.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new("1", "Vegeta", vec!["Dragon Ball".into(), "Super".into()]),
            Item::new("2", "luffy", "One Piece"),
            Item::new("3", "Goku", "Dragon Ball"),
            Item::new("4", "Zoro", vec!["One Piece".into(), "Anime".into()]),
        ]
    }

    #[test]
    fn none_preserves_input_order() {
        let sorted = order(sample(), SortSpec::descending(SortKey::None));
        assert_eq!(ids(&sorted), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn name_ascending_ignores_case() {
        let sorted = order(sample(), SortSpec::ascending(SortKey::Name));
        assert_eq!(ids(&sorted), vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn name_descending_is_reversed() {
        let sorted = order(sample(), SortSpec::descending(SortKey::Name));
        assert_eq!(ids(&sorted), vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn series_uses_first_label_only() {
        // "Anime" is Zoro's second label and must not pull it to the front.
        let sorted = order(sample(), SortSpec::ascending(SortKey::Series));
        assert_eq!(ids(&sorted), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let items = vec![
            Item::new("a", "Goku", "Dragon Ball"),
            Item::new("b", "Luffy", "One Piece"),
            Item::new("c", "goku", "Dragon Ball Z"),
            Item::new("d", "GOKU", "Dragon Ball"),
        ];
        let asc = order(items.clone(), SortSpec::ascending(SortKey::Name));
        assert_eq!(ids(&asc), vec!["a", "c", "d", "b"]);
        let desc = order(items, SortSpec::descending(SortKey::Name));
        assert_eq!(ids(&desc), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn missing_series_sorts_first_ascending() {
        let items = vec![
            Item::new("1", "Goku", "Dragon Ball"),
            Item::new("2", "Mystery", Vec::<String>::new()),
        ];
        let sorted = order(items, SortSpec::ascending(SortKey::Series));
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }
}
