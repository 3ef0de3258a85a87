//! Query resolution over an item gateway.
//!
//! The store can only answer prefix and exact-membership lookups, while a
//! search term matches anywhere inside a name or series label. Results are
//! therefore always computed from a full candidate set (the whole collection,
//! or the exact members of the selected category) filtered locally. Indexed
//! prefix lookups are only used for [`QueryResolver::resolve_with_preview`],
//! whose preview is provisional by contract.

use std::collections::HashSet;
use std::sync::Arc;

use crate::categories;
use crate::error::CatalogError;
use crate::item::Item;
use crate::query::{Category, Query, RawQuery, Scope};
use crate::sort;
use crate::store::{ItemGateway, StoreError};

/// Resolves catalog queries against an injected gateway.
///
/// Holds no state between calls; clones share the gateway.
#[derive(Clone)]
pub struct QueryResolver {
    gateway: Arc<dyn ItemGateway>,
}

impl QueryResolver {
    pub fn new(gateway: Arc<dyn ItemGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve a query into an ordered list of distinct items.
    pub fn resolve(&self, query: &Query) -> Result<Vec<Item>, CatalogError> {
        tracing::debug!(
            "Resolving query: term={:?} scope={} category={:?} sort={:?}",
            query.term,
            query.scope,
            query.category,
            query.sort
        );

        let term = query.term.to_lowercase();
        let matched: Vec<Item> = self
            .category_universe(&query.category)?
            .into_iter()
            .filter(|item| matches_term(item, &term, query.scope))
            .collect();
        let candidates = merge_by_id([matched]);

        tracing::debug!("Retrieved {} items before sorting", candidates.len());
        Ok(sort::order(candidates, query.sort))
    }

    /// Validate raw query values, then resolve.
    pub fn resolve_raw(&self, raw: RawQuery) -> Result<Vec<Item>, CatalogError> {
        let query = Query::try_from(raw)?;
        self.resolve(&query)
    }

    /// Resolve, handing an index-only result to `on_preview` first.
    ///
    /// The preview comes from the name-prefix lookup and the series
    /// membership lookup (run one after the other, merged by id), filtered
    /// and ordered like the final result. It may miss items that only match
    /// in the middle of a name or label. The returned list is the same as
    /// [`resolve`](Self::resolve) would give. An empty term produces no
    /// preview. If the final pass fails, the error is returned even though a
    /// preview was already delivered.
    pub fn resolve_with_preview<F>(
        &self,
        query: &Query,
        on_preview: F,
    ) -> Result<Vec<Item>, CatalogError>
    where
        F: FnOnce(&[Item]),
    {
        if !query.term.is_empty() {
            let term = query.term.to_lowercase();
            let mut lists = Vec::new();
            if query.scope.covers_name() {
                lists.push(self.fetch("name prefix", |g| g.fetch_by_name_prefix(&term))?);
            }
            if query.scope.covers_series() {
                lists.push(self.fetch("series membership", |g| g.fetch_by_series(&query.term))?);
            }
            let preview: Vec<Item> = merge_by_id(lists)
                .into_iter()
                .filter(|item| in_category(item, &query.category))
                .filter(|item| matches_term(item, &term, query.scope))
                .collect();
            tracing::debug!("Preview has {} indexed items", preview.len());
            on_preview(&sort::order(preview, query.sort));
        }
        self.resolve(query)
    }

    /// Look up one item. A missing item is `Ok(None)`.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Item>, CatalogError> {
        let item = self.fetch("id", |g| g.fetch_by_id(id))?;
        if item.is_none() {
            tracing::debug!("No item with id {:?}", id);
        }
        Ok(item)
    }

    /// Distinct series labels of the whole, unfiltered collection.
    pub fn build_categories(&self) -> Result<Vec<String>, CatalogError> {
        let items = self.fetch("all", |g| g.fetch_all())?;
        Ok(categories::build_categories(&items))
    }

    /// Items eligible before term matching: everything, or the exact members
    /// of the selected category.
    fn category_universe(&self, category: &Category) -> Result<Vec<Item>, CatalogError> {
        match category.label() {
            None => self.fetch("all", |g| g.fetch_all()),
            Some(label) => {
                let mut items = self.fetch("series membership", |g| g.fetch_by_series(label))?;
                items.retain(|item| item.series().contains(label));
                Ok(items)
            }
        }
    }

    fn fetch<T>(
        &self,
        lookup: &str,
        call: impl FnOnce(&dyn ItemGateway) -> Result<T, StoreError>,
    ) -> Result<T, CatalogError> {
        call(self.gateway.as_ref()).map_err(|e| {
            tracing::warn!("Store lookup ({}) failed: {}", lookup, e);
            CatalogError::StoreUnavailable(e)
        })
    }
}

/// Case-insensitive substring match of an already-lowercased term.
///
/// The empty term matches every item.
pub fn matches_term(item: &Item, term_lower: &str, scope: Scope) -> bool {
    if term_lower.is_empty() {
        return true;
    }
    (scope.covers_name() && item.name_lower().contains(term_lower))
        || (scope.covers_series()
            && item
                .series_lower()
                .iter()
                .any(|label| label.contains(term_lower)))
}

fn in_category(item: &Item, category: &Category) -> bool {
    category
        .label()
        .map_or(true, |label| item.series().contains(label))
}

/// Concatenate candidate lists, keeping the first occurrence of each id.
pub fn merge_by_id<I>(lists: I) -> Vec<Item>
where
    I: IntoIterator<Item = Vec<Item>>,
{
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}
