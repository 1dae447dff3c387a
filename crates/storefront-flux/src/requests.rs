//! Request builders
//!
//! Assemble backend requests from the current state. Every builder computes
//! a base request and runs it through the configured layers:
//!
//! ```text
//! computed base → config defaults → per-call override → config overrides
//! ```
//!
//! No request ever reaches past `MAX_RECORDS`: the page size is clamped
//! after the layers ran, so configuration cannot break the ceiling either.

use crate::error::RequestError;
use crate::selectors;
use crate::state::StoreState;
use storefront_client::{
    AutocompleteRequest, BackendSort, SearchRequest, SearchRequestPatch, SelectedRefinement,
    SortOrder,
};

/// Highest record offset the bridge serves
pub const MAX_RECORDS: u64 = 10_000;

/// Page size that keeps the page within `MAX_RECORDS`
pub fn clamp_page_size(current_page: u64, page_size: u64) -> u64 {
    let skip = current_page.saturating_sub(1).saturating_mul(page_size);
    page_size.min(MAX_RECORDS.saturating_sub(skip))
}

fn clamp(mut request: SearchRequest) -> SearchRequest {
    request.page_size = request
        .page_size
        .min(MAX_RECORDS.saturating_sub(request.skip));
    request
}

/// Ascending is expressed by leaving the order out
pub fn backend_sort(field: &str, descending: bool) -> BackendSort {
    BackendSort {
        field: field.to_string(),
        order: descending.then_some(SortOrder::Descending),
    }
}

fn base_search(state: &StoreState) -> SearchRequest {
    let config = selectors::config(state);
    SearchRequest {
        area: config.area.clone(),
        collection: selectors::collection(state).to_string(),
        language: config.language.clone(),
        query: selectors::query(state).map(str::to_string),
        refinements: selectors::selected_refinements(state),
        skip: selectors::skip(state),
        page_size: clamp_page_size(selectors::current_page(state), selectors::page_size(state)),
        sort: selectors::sort(state).map(|sort| backend_sort(&sort.field, sort.descending)),
        fields: config.search.fields.clone(),
        prune_refinements: config.search.prune_refinements,
        ..SearchRequest::default()
    }
}

/// Request for the current page of the main search
pub fn search(state: &StoreState, call_override: Option<&SearchRequestPatch>) -> SearchRequest {
    let layers = &selectors::config(state).search.layers;
    clamp(layers.compose(base_search(state), call_override))
}

/// Request for `amount` products after the ones already loaded
pub fn more_products(state: &StoreState, amount: u64) -> Result<SearchRequest, RequestError> {
    let loaded = selectors::products(state).len() as u64;
    if loaded >= MAX_RECORDS {
        return Err(RequestError::RecordLimit { limit: MAX_RECORDS });
    }

    let patch = SearchRequestPatch {
        skip: Some(loaded),
        page_size: Some(amount),
        ..SearchRequestPatch::default()
    };
    Ok(search(state, Some(&patch)))
}

/// Request for the remaining refinements of one navigation
///
/// Based on the request that produced the current results, so the refinements
/// belong to the result set on screen.
pub fn more_refinements(
    state: &StoreState,
    navigation_id: &str,
) -> Result<SearchRequest, RequestError> {
    if selectors::navigation(state, navigation_id).is_none() {
        return Err(RequestError::UnknownNavigation(navigation_id.to_string()));
    }

    let base = match &state.session.last_search_request {
        Some(request) => request.clone(),
        None => search(state, None),
    };
    let layers = &selectors::config(state).refinements;
    Ok(clamp(layers.compose(base, None)))
}

/// Request for a single product by id
pub fn details(state: &StoreState, id: &str) -> SearchRequest {
    let base = SearchRequest {
        query: None,
        refinements: vec![SelectedRefinement::Value {
            navigation_name: "id".to_string(),
            value: id.to_string(),
            exclude: false,
        }],
        skip: 0,
        page_size: 1,
        sort: None,
        ..base_search(state)
    };
    selectors::config(state).details.compose(base, None)
}

/// Request counting the records of another collection for the current search
pub fn collection_count(state: &StoreState, collection: &str) -> SearchRequest {
    let patch = SearchRequestPatch {
        collection: Some(collection.to_string()),
        skip: Some(0),
        page_size: Some(0),
        ..SearchRequestPatch::default()
    };
    search(state, Some(&patch))
}

pub fn autocomplete_suggestions(state: &StoreState, query: &str) -> AutocompleteRequest {
    let config = selectors::config(state);
    let autocomplete = &config.autocomplete;
    let base = AutocompleteRequest {
        query: query.to_string(),
        collection: autocomplete
            .collection
            .clone()
            .unwrap_or_else(|| selectors::collection(state).to_string()),
        area: autocomplete.area.clone().unwrap_or_else(|| config.area.clone()),
        language: autocomplete.language.clone().or_else(|| config.language.clone()),
        num_search_terms: autocomplete.suggestion_count,
        num_navigations: autocomplete.navigation_count,
        sort_alphabetically: autocomplete.sort_alphabetically,
        fuzzy_matching: autocomplete.fuzzy_matching,
    };
    autocomplete.suggestions.compose(base, None)
}

/// Product preview for a partial query
///
/// Starts fresh: current refinements, paging and sort are ignored. Only the
/// given refinements (usually one suggested navigation value) apply.
pub fn autocomplete_products(
    state: &StoreState,
    query: &str,
    refinements: &[SelectedRefinement],
) -> SearchRequest {
    let config = selectors::config(state);
    let autocomplete = &config.autocomplete;
    let base = SearchRequest {
        query: Some(query.to_string()),
        refinements: Vec::new(),
        skip: 0,
        sort: None,
        area: autocomplete.area.clone().unwrap_or_else(|| config.area.clone()),
        language: autocomplete.language.clone().or_else(|| config.language.clone()),
        page_size: autocomplete.product_count,
        ..base_search(state)
    };
    let patch = (!refinements.is_empty()).then(|| SearchRequestPatch {
        refinements: Some(refinements.to_vec()),
        ..SearchRequestPatch::default()
    });
    clamp(autocomplete.products.compose(base, patch.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Navigation, Product, Refinement, Sort};
    use pretty_assertions::assert_eq;
    use storefront_config::Configuration;

    fn state_with_brand() -> StoreState {
        let mut state = StoreState::default();
        state.data.navigations.insert(
            "brand".to_string(),
            Navigation {
                refinements: vec![Refinement::value("Nike")],
                selected: vec![0],
                ..Navigation::new("brand")
            },
        );
        state.data.query.original = Some("shoes".to_string());
        state
    }

    #[test]
    fn test_search_request_from_state() {
        let mut state = state_with_brand();
        state.data.page.current = 3;
        state.data.sorts.items = vec![Sort {
            field: "price".to_string(),
            descending: true,
            label: None,
        }];

        let request = search(&state, None);
        assert_eq!(request.area, "Production");
        assert_eq!(request.collection, "default");
        assert_eq!(request.query.as_deref(), Some("shoes"));
        assert_eq!(request.skip, 20);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort, Some(backend_sort("price", true)));
        assert_eq!(request.refinements.len(), 1);
    }

    #[test]
    fn test_page_size_never_passes_record_limit() {
        for page in [1, 2, 100, 400, 999, 1000, 1001, 5000] {
            for size in [1, 10, 25, 50, 100, 10_000] {
                let clamped = clamp_page_size(page, size);
                let skip = (page - 1) * size;
                assert!(clamped <= MAX_RECORDS.saturating_sub(skip), "page {} size {}", page, size);
                assert!(clamped <= size);
            }
        }
        assert_eq!(clamp_page_size(1000, 10), 10);
        assert_eq!(clamp_page_size(1001, 10), 0);
        assert_eq!(clamp_page_size(2, 9_000), 1_000);
    }

    #[test]
    fn test_layers_apply_in_order() {
        let toml = r#"
            [search.defaults]
            page_size = 50
            match_strategy_name = "relaxed"

            [search.overrides]
            area = "Staging"
        "#;
        let config = Configuration::from_toml_str(toml).unwrap();
        let state = StoreState::from_config(config);

        // defaults lose to the per-call override, which loses to overrides
        let patch = SearchRequestPatch {
            page_size: Some(24),
            area: Some("Preview".to_string()),
            ..SearchRequestPatch::default()
        };
        let request = search(&state, Some(&patch));
        assert_eq!(request.page_size, 24);
        assert_eq!(request.area, "Staging");
        assert_eq!(request.match_strategy_name.as_deref(), Some("relaxed"));
    }

    #[test]
    fn test_overrides_cannot_break_record_limit() {
        let toml = r#"
            [search.overrides]
            page_size = 5000
        "#;
        let config = Configuration::from_toml_str(toml).unwrap();
        let mut state = StoreState::from_config(config);
        state.data.page.current = 900;

        let request = search(&state, None);
        assert_eq!(request.skip, 8_990);
        assert_eq!(request.page_size, 1_010);
    }

    #[test]
    fn test_more_products_skips_loaded() {
        let mut state = state_with_brand();
        state.data.products = vec![Product::default(); 30];

        let request = more_products(&state, 20).unwrap();
        assert_eq!(request.skip, 30);
        assert_eq!(request.page_size, 20);

        state.data.products = vec![Product::default(); MAX_RECORDS as usize];
        assert_eq!(
            more_products(&state, 20),
            Err(RequestError::RecordLimit { limit: MAX_RECORDS })
        );
    }

    #[test]
    fn test_more_refinements_uses_last_request() {
        let mut state = state_with_brand();
        let mut last = search(&state, None);
        last.query = Some("boots".to_string());
        state.session.last_search_request = Some(last);

        let request = more_refinements(&state, "brand").unwrap();
        assert_eq!(request.query.as_deref(), Some("boots"));

        assert_eq!(
            more_refinements(&state, "color"),
            Err(RequestError::UnknownNavigation("color".to_string()))
        );
    }

    #[test]
    fn test_details_request() {
        let state = state_with_brand();
        let request = details(&state, "sku-1");
        assert_eq!(request.page_size, 1);
        assert_eq!(request.query, None);
        assert_eq!(
            request.refinements,
            vec![SelectedRefinement::Value {
                navigation_name: "id".to_string(),
                value: "sku-1".to_string(),
                exclude: false,
            }]
        );
    }

    #[test]
    fn test_collection_count_request() {
        let mut state = state_with_brand();
        state.data.page.current = 4;
        let request = collection_count(&state, "sale");
        assert_eq!(request.collection, "sale");
        assert_eq!(request.page_size, 0);
        assert_eq!(request.skip, 0);
        assert_eq!(request.query.as_deref(), Some("shoes"));
    }

    #[test]
    fn test_autocomplete_products_start_fresh() {
        let mut config = Configuration::default();
        config.autocomplete.area = Some("Autocomplete".to_string());
        config.autocomplete.product_count = 6;
        let mut state = StoreState::from_config(config);
        state.data.page.current = 5;
        state.data.sorts.items = vec![Sort {
            field: "price".to_string(),
            descending: false,
            label: None,
        }];
        state.data.navigations.insert(
            "brand".to_string(),
            Navigation {
                refinements: vec![Refinement::value("Nike")],
                selected: vec![0],
                ..Navigation::new("brand")
            },
        );

        let request = autocomplete_products(&state, "red", &[]);
        assert_eq!(request.query.as_deref(), Some("red"));
        assert!(request.refinements.is_empty());
        assert_eq!(request.skip, 0);
        assert_eq!(request.sort, None);
        assert_eq!(request.area, "Autocomplete");
        assert_eq!(request.page_size, 6);

        let color = SelectedRefinement::Value {
            navigation_name: "color".to_string(),
            value: "red".to_string(),
            exclude: false,
        };
        let request = autocomplete_products(&state, "red", &[color.clone()]);
        assert_eq!(request.refinements, vec![color]);
    }

    #[test]
    fn test_autocomplete_suggestions_request() {
        let mut config = Configuration::default();
        config.language = Some("en".to_string());
        config.autocomplete.suggestion_count = 8;
        let state = StoreState::from_config(config);

        let request = autocomplete_suggestions(&state, "re");
        assert_eq!(request.query, "re");
        assert_eq!(request.collection, "default");
        assert_eq!(request.area, "Production");
        assert_eq!(request.language.as_deref(), Some("en"));
        assert_eq!(request.num_search_terms, 8);
    }
}
