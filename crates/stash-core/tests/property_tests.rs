//! Property-based tests for query resolution

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use stash_core::collation::CollationKey;
use stash_core::{
    build_categories, Item, MemoryItemStore, Query, QueryResolver, Scope, SortKey, SortSpec,
};

const LABELS: &[&str] = &["Dragon Ball", "One Piece", "Super", "naruto", ""];

fn collection() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            "[a-cA-C ]{0,4}",
            prop::collection::vec(prop::sample::select(LABELS.to_vec()), 1..3),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, series))| {
                let series: Vec<String> = series.into_iter().map(String::from).collect();
                Item::new(i.to_string(), name, series)
            })
            .collect()
    })
}

fn resolver_for(items: &[Item]) -> QueryResolver {
    QueryResolver::new(Arc::new(MemoryItemStore::with_items(items.to_vec()).unwrap()))
}

fn id_set(items: &[Item]) -> HashSet<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

fn position(items: &[Item], id: &str) -> usize {
    items.iter().position(|i| i.id == id).unwrap()
}

proptest! {
    #[test]
    fn empty_term_returns_everything(items in collection()) {
        let result = resolver_for(&items).resolve(&Query::default()).unwrap();
        prop_assert_eq!(result, items);
    }

    #[test]
    fn all_scope_is_union_of_name_and_series(items in collection(), term in "[a-cA-C ]{0,2}") {
        let resolver = resolver_for(&items);
        let all = resolver.resolve(&Query::new(term.as_str()).scope(Scope::All)).unwrap();
        let name = resolver.resolve(&Query::new(term.as_str()).scope(Scope::Name)).unwrap();
        let series = resolver.resolve(&Query::new(term.as_str()).scope(Scope::Series)).unwrap();

        let union: HashSet<String> = id_set(&name).union(&id_set(&series)).cloned().collect();
        prop_assert_eq!(id_set(&all), union);
    }

    #[test]
    fn results_have_distinct_ids(items in collection(), term in "[a-cA-C]{0,2}") {
        let result = resolver_for(&items).resolve(&Query::new(term)).unwrap();
        prop_assert_eq!(id_set(&result).len(), result.len());
    }

    #[test]
    fn category_only_narrows(
        items in collection(),
        term in "[a-c]{0,2}",
        label in prop::sample::select(LABELS.to_vec()),
    ) {
        let resolver = resolver_for(&items);
        let unfiltered = id_set(&resolver.resolve(&Query::new(term.as_str())).unwrap());
        let filtered = resolver
            .resolve(&Query::new(term.as_str()).category(label))
            .unwrap();
        for item in &filtered {
            prop_assert!(unfiltered.contains(&item.id));
            prop_assert!(item.series().contains(label) || label.is_empty());
        }
    }

    #[test]
    fn descending_reverses_only_distinct_keys(items in collection()) {
        let resolver = resolver_for(&items);
        let asc = resolver
            .resolve(&Query::default().sort(SortSpec::ascending(SortKey::Name)))
            .unwrap();
        let desc = resolver
            .resolve(&Query::default().sort(SortSpec::descending(SortKey::Name)))
            .unwrap();

        for a in &items {
            for b in &items {
                let (pa, pb) = (position(&items, &a.id), position(&items, &b.id));
                if pa >= pb {
                    continue;
                }
                let (ka, kb) = (CollationKey::new(a.name()), CollationKey::new(b.name()));
                let asc_order = position(&asc, &a.id) < position(&asc, &b.id);
                let desc_order = position(&desc, &a.id) < position(&desc, &b.id);
                if ka == kb {
                    // Ties keep store order in both directions.
                    prop_assert!(asc_order && desc_order);
                } else {
                    prop_assert_eq!(asc_order, ka < kb);
                    prop_assert_eq!(desc_order, ka > kb);
                }
            }
        }
    }

    #[test]
    fn categories_are_sorted_and_unique(items in collection()) {
        let categories = build_categories(&items);
        let unique: HashSet<&String> = categories.iter().collect();
        prop_assert_eq!(unique.len(), categories.len());
        prop_assert!(categories.iter().all(|c| !c.is_empty() && c.trim() == c.as_str()));

        let again = build_categories(&items);
        prop_assert_eq!(&categories, &again);
    }

    #[test]
    fn preview_matches_final_result(items in collection(), term in "[a-cA-C]{1,2}") {
        let resolver = resolver_for(&items);
        let query = Query::new(term).sort(SortSpec::ascending(SortKey::Series));
        let mut preview: Vec<String> = Vec::new();
        let result = resolver
            .resolve_with_preview(&query, |items| {
                preview = items.iter().map(|i| i.id.clone()).collect();
            })
            .unwrap();
        prop_assert_eq!(&result, &resolver.resolve(&query).unwrap());
        let final_ids = id_set(&result);
        prop_assert!(preview.iter().all(|id| final_ids.contains(id)));
    }
}
