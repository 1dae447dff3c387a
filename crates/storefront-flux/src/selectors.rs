//! Selectors
//!
//! Read-only projections of the store state. Request builders and the
//! facade read the state exclusively through these.

use crate::adapters::to_selected_refinement;
use crate::state::{
    Autocomplete, Collection, Navigation, Page, Product, RequestKind, Sort, StoreState,
    GLOBAL_COMPONENT_ID,
};
use serde_json::Value;
use storefront_client::SelectedRefinement;
use storefront_config::Configuration;

/// Every applied refinement, in navigation order, shaped for the backend
pub fn selected_refinements(state: &StoreState) -> Vec<SelectedRefinement> {
    state
        .data
        .navigations
        .iter()
        .flat_map(|navigation| {
            navigation
                .selected_refinements()
                .filter_map(move |refinement| to_selected_refinement(navigation, refinement))
        })
        .collect()
}

pub fn config(state: &StoreState) -> &Configuration {
    &state.session.config
}

pub fn query(state: &StoreState) -> Option<&str> {
    state.data.query.original.as_deref()
}

pub fn page(state: &StoreState) -> &Page {
    &state.data.page
}

pub fn current_page(state: &StoreState) -> u64 {
    state.data.page.current
}

/// Selected page size, falling back to the configured default
pub fn page_size(state: &StoreState) -> u64 {
    state
        .data
        .page
        .sizes
        .selected_size()
        .unwrap_or(state.session.config.page_size.default)
}

/// Records before the current page
pub fn skip(state: &StoreState) -> u64 {
    current_page(state)
        .saturating_sub(1)
        .saturating_mul(page_size(state))
}

pub fn collection(state: &StoreState) -> &str {
    &state.data.collections.selected
}

pub fn collections(state: &StoreState) -> Vec<&Collection> {
    state.data.collections.items.iter().collect()
}

pub fn collection_total(state: &StoreState, name: &str) -> Option<u64> {
    state
        .data
        .collections
        .items
        .get(name)
        .and_then(|collection| collection.total)
}

pub fn sort(state: &StoreState) -> Option<&Sort> {
    let sorts = &state.data.sorts;
    sorts.items.get(sorts.selected)
}

pub fn sorts(state: &StoreState) -> &[Sort] {
    &state.data.sorts.items
}

pub fn navigation<'a>(state: &'a StoreState, field: &str) -> Option<&'a Navigation> {
    state.data.navigations.get(field)
}

pub fn navigations(state: &StoreState) -> Vec<&Navigation> {
    state.data.navigations.iter().collect()
}

pub fn has_more_refinements(state: &StoreState, field: &str) -> bool {
    navigation(state, field).is_some_and(|navigation| navigation.more)
}

pub fn products(state: &StoreState) -> &[Product] {
    &state.data.products
}

pub fn products_loaded(state: &StoreState) -> bool {
    state.data.products_loaded
}

pub fn record_count(state: &StoreState) -> u64 {
    state.data.record_count
}

pub fn autocomplete(state: &StoreState) -> &Autocomplete {
    &state.data.autocomplete
}

pub fn autocomplete_query(state: &StoreState) -> &str {
    &state.data.autocomplete.query
}

pub fn is_fetching(state: &StoreState, kind: RequestKind) -> bool {
    state.data.is_fetching.get(kind)
}

pub fn details_product(state: &StoreState) -> Option<&Product> {
    state.data.details.product.as_ref()
}

pub fn recall_id(state: &StoreState) -> Option<&str> {
    state.session.recall_id.as_deref()
}

pub fn search_id(state: &StoreState) -> Option<&str> {
    state.session.search_id.as_deref()
}

/// State of one component instance with the tag's global state merged under it
///
/// Object states merge key by key with the instance winning; any other
/// instance state replaces the global one outright.
pub fn ui_state(state: &StoreState, tag: &str, id: &str) -> Option<Value> {
    let components = state.ui.get(tag)?;
    let global = components.get(GLOBAL_COMPONENT_ID);
    let own = components.get(id);

    match (global, own) {
        (Some(Value::Object(global)), Some(Value::Object(own))) => {
            let mut merged = global.clone();
            merged.extend(own.iter().map(|(key, value)| (key.clone(), value.clone())));
            Some(Value::Object(merged))
        }
        (_, Some(own)) => Some(own.clone()),
        (global, None) => global.cloned(),
    }
}
