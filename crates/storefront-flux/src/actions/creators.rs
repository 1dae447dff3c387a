//! Action creators
//!
//! Build well-formed actions and the compound units UI code dispatches.
//! Compound operations (a new search, switching a refinement) are returned as
//! a single [`Dispatchable`] so their members share one set of correlation
//! ids. Whether a member actually applies is left to the validators.

use super::{
    Action, AutocompleteSuggestions, CollectionCount, Dispatchable, IndexTarget, MoreRefinements,
    ProductsReceived, Received, RefinementTarget, ResetTarget,
};
use crate::adapters::{
    augment_products, combine_navigations, extract_navigation, extract_page, extract_query,
    extract_template, prune_refinements, refinements_match, sort_navigations, sort_refinements,
};
use crate::error::FetchError;
use crate::selectors;
use crate::state::{Navigation, Product, Refinement, StoreState};
use serde_json::Value;
use storefront_client::{RefinementsResponse, SearchRequest, SearchResponse, SelectedRefinement};

pub fn update_query(query: Option<String>) -> Action {
    Action::UpdateQuery(query)
}

pub fn add_refinement(navigation_id: impl Into<String>, value: impl Into<String>) -> Action {
    Action::AddRefinement(RefinementTarget {
        navigation_id: navigation_id.into(),
        refinement: Refinement::value(value),
    })
}

pub fn add_range_refinement(navigation_id: impl Into<String>, low: f64, high: f64) -> Action {
    Action::AddRefinement(RefinementTarget {
        navigation_id: navigation_id.into(),
        refinement: Refinement::range(low, high),
    })
}

pub fn reset_refinements(target: ResetTarget) -> Action {
    Action::ResetRefinements(target)
}

pub fn reset_page() -> Action {
    Action::ResetPage
}

pub fn select_refinement(navigation_id: impl Into<String>, index: usize) -> Action {
    Action::SelectRefinement(IndexTarget {
        navigation_id: navigation_id.into(),
        index,
    })
}

pub fn deselect_refinement(navigation_id: impl Into<String>, index: usize) -> Dispatchable {
    Dispatchable::Batch(vec![
        reset_page(),
        Action::DeselectRefinement(IndexTarget {
            navigation_id: navigation_id.into(),
            index,
        }),
    ])
}

pub fn select_collection(collection: impl Into<String>) -> Dispatchable {
    Dispatchable::Batch(vec![reset_page(), Action::SelectCollection(collection.into())])
}

pub fn select_sort(index: usize) -> Dispatchable {
    Dispatchable::Batch(vec![reset_page(), Action::SelectSort(index)])
}

pub fn update_page_size(size: u64) -> Dispatchable {
    Dispatchable::Batch(vec![reset_page(), Action::UpdatePageSize(size)])
}

pub fn update_current_page(page: u64) -> Action {
    Action::UpdateCurrentPage(page)
}

pub fn update_details(product: Product) -> Action {
    Action::UpdateDetails(product)
}

pub fn update_autocomplete_query(query: impl Into<String>) -> Action {
    Action::UpdateAutocompleteQuery(query.into())
}

pub fn create_component_state(tag: impl Into<String>, id: impl Into<String>, state: Value) -> Action {
    Action::CreateComponentState {
        tag: tag.into(),
        id: id.into(),
        state,
    }
}

pub fn remove_component_state(tag: impl Into<String>, id: impl Into<String>) -> Action {
    Action::RemoveComponentState {
        tag: tag.into(),
        id: id.into(),
    }
}

pub fn refresh_state(state: StoreState) -> Action {
    Action::RefreshState(Box::new(state))
}

/// Partial search specification for [`update_search`]
///
/// Refinement fields need `navigation_id`; of `index`, `range` and `value`
/// only the first one set (in that order) is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchUpdate {
    /// `Some(None)` clears the query
    pub query: Option<Option<String>>,
    pub clear: Option<ResetTarget>,
    pub navigation_id: Option<String>,
    pub index: Option<usize>,
    pub range: Option<(f64, f64)>,
    pub value: Option<String>,
}

/// Incremental search change; always goes back to the first page
pub fn update_search(update: SearchUpdate) -> Dispatchable {
    let mut actions = vec![reset_page()];

    if let Some(query) = update.query {
        actions.push(update_query(query));
    }
    if let Some(target) = update.clear {
        actions.push(reset_refinements(target));
    }
    if let Some(navigation_id) = update.navigation_id {
        if let Some(index) = update.index {
            actions.push(select_refinement(navigation_id, index));
        } else if let Some((low, high)) = update.range {
            actions.push(add_range_refinement(navigation_id, low, high));
        } else if let Some(value) = update.value {
            actions.push(add_refinement(navigation_id, value));
        }
    }

    Dispatchable::Batch(actions)
}

/// Start a brand-new search
///
/// Resets the page, switches back to the default collection when configured
/// to, clears every refinement and sets the query. Without a query the
/// current one is searched again.
pub fn search(query: Option<String>) -> Dispatchable {
    Dispatchable::deferred(move |state| search_actions(state, query).into())
}

fn search_actions(state: &StoreState, query: Option<String>) -> Vec<Action> {
    let config = selectors::config(state);
    let mut actions = vec![reset_page()];
    if config.search.use_default_collection {
        actions.push(Action::SelectCollection(config.collections.default.clone()));
    }
    actions.push(reset_refinements(ResetTarget::All));
    let query = query.or_else(|| selectors::query(state).map(str::to_string));
    actions.push(update_query(query));
    actions
}

/// Replace every refinement of a single-select navigation with one new value
pub fn switch_refinement(navigation_id: impl Into<String>, refinement: Refinement) -> Dispatchable {
    let navigation_id = navigation_id.into();
    Dispatchable::Batch(vec![
        reset_page(),
        reset_refinements(ResetTarget::Field(navigation_id.clone())),
        Action::AddRefinement(RefinementTarget {
            navigation_id,
            refinement,
        }),
    ])
}

/// Restart the recall, optionally preselecting one refinement
pub fn reset_recall(query: Option<String>, select: Option<IndexTarget>) -> Dispatchable {
    Dispatchable::deferred(move |state| {
        let mut actions = search_actions(state, query);
        if let Some(target) = select {
            actions.push(Action::SelectRefinement(target));
        }
        actions.into()
    })
}

pub fn fetch_products() -> Action {
    Action::FetchProducts
}

pub fn fetch_more_products(amount: u64) -> Action {
    Action::FetchMoreProducts(amount)
}

pub fn fetch_more_refinements(navigation_id: impl Into<String>) -> Action {
    Action::FetchMoreRefinements(navigation_id.into())
}

pub fn fetch_autocomplete_suggestions(query: impl Into<String>) -> Action {
    Action::FetchAutocompleteSuggestions(query.into())
}

pub fn fetch_autocomplete_products(
    query: impl Into<String>,
    refinements: Vec<SelectedRefinement>,
) -> Action {
    Action::FetchAutocompleteProducts {
        query: query.into(),
        refinements,
    }
}

pub fn fetch_product_details(id: impl Into<String>) -> Action {
    Action::FetchProductDetails(id.into())
}

pub fn fetch_collection_count(collection: impl Into<String>) -> Action {
    Action::FetchCollectionCount(collection.into())
}

/// Fan a search response out into the store
///
/// A redirect short-circuits: only the receipt and the redirect are applied.
/// Otherwise query, records, navigations, record count, page, template and
/// the selected collection's count follow the receipt. Navigations and page
/// are derived against the state current when the response is applied.
pub fn receive_products(
    request: SearchRequest,
    result: Result<SearchResponse, FetchError>,
) -> Dispatchable {
    let response = match result {
        Ok(response) => response,
        Err(e) => return Action::ReceiveProducts(Err(e)).into(),
    };

    Dispatchable::deferred(move |state| {
        if let Some(url) = response.redirect.clone() {
            return vec![
                Action::ReceiveProducts(Ok(ProductsReceived { request, response })),
                Action::ReceiveRedirect(url),
            ]
            .into();
        }

        let count = response.total_record_count;
        let query = extract_query(request.query.as_deref(), &response);
        let products = augment_products(&response.records);
        let navigations = receive_navigations(state, &response);
        let window = extract_page(count, selectors::page_size(state), selectors::current_page(state));
        let template = extract_template(&response.template);
        let collection = request.collection.clone();

        vec![
            Action::ReceiveProducts(Ok(ProductsReceived { request, response })),
            Action::ReceiveQuery(query),
            Action::ReceiveProductRecords(products),
            Action::ReceiveNavigations(navigations),
            Action::ReceiveRecordCount(count),
            Action::ReceivePage(window),
            Action::ReceiveTemplate(template),
            receive_collection_count(Ok(CollectionCount { collection, count })),
        ]
        .into()
    })
}

/// Navigations of a response, pruned and ordered per configuration
fn receive_navigations(state: &StoreState, response: &SearchResponse) -> Vec<Navigation> {
    let config = &selectors::config(state).navigations;
    let combined = combine_navigations(&response.available_navigation, &response.selected_navigation);
    let navigations = prune_refinements(combined, response.total_record_count)
        .into_iter()
        .map(|navigation| order_refinements(state, navigation))
        .collect();
    sort_navigations(navigations, &config.pinned)
}

fn order_refinements(state: &StoreState, navigation: Navigation) -> Navigation {
    let config = &selectors::config(state).navigations;
    let pinned = config
        .pinned_refinements
        .get(&navigation.field)
        .map(Vec::as_slice)
        .unwrap_or_default();
    sort_refinements(navigation, pinned, config.sort_refinements)
}

pub fn receive_more_products(result: Received<Vec<Product>>) -> Action {
    Action::ReceiveMoreProducts(result)
}

/// Replace a navigation's refinements with the full list
///
/// Selection is re-derived by matching the returned refinements against the
/// ones selected when the response is applied.
pub fn receive_more_refinements(
    navigation_id: String,
    result: Result<RefinementsResponse, FetchError>,
) -> Dispatchable {
    let response = match result {
        Ok(response) => response,
        Err(e) => return Action::ReceiveMoreRefinements(Err(e)).into(),
    };

    Dispatchable::deferred(move |state| {
        let Some(current) = selectors::navigation(state, &navigation_id) else {
            return Action::ReceiveMoreRefinements(Err(FetchError::action(format!(
                "navigation '{}' is gone",
                navigation_id
            ))))
            .into();
        };

        let kind = current.kind();
        let fetched = extract_navigation(&response.navigation);
        let selected = fetched
            .refinements
            .iter()
            .enumerate()
            .filter(|(_, refinement)| {
                current
                    .selected_refinements()
                    .any(|selected| refinements_match(selected, refinement, kind))
            })
            .map(|(index, _)| index)
            .collect();

        let merged = order_refinements(
            state,
            Navigation {
                refinements: fetched.refinements,
                selected,
                sort: fetched.sort.or(current.sort),
                ..current.clone()
            },
        );

        Action::ReceiveMoreRefinements(Ok(MoreRefinements {
            navigation_id,
            refinements: merged.refinements,
            selected: merged.selected,
        }))
        .into()
    })
}

pub fn receive_autocomplete_suggestions(result: Received<AutocompleteSuggestions>) -> Action {
    Action::ReceiveAutocompleteSuggestions(result)
}

pub fn receive_autocomplete_products(result: Received<Vec<Product>>) -> Action {
    Action::ReceiveAutocompleteProducts(result)
}

pub fn receive_details_product(result: Received<Product>) -> Action {
    Action::ReceiveDetailsProduct(result)
}

pub fn receive_collection_count(result: Received<CollectionCount>) -> Action {
    Action::ReceiveCollectionCount(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{stamp_correlation_ids, SequentialIds};
    use crate::state::RequestKind;
    use pretty_assertions::assert_eq;
    use storefront_client::{BackendNavigation, BackendRefinement, Record};

    fn value(value: &str, count: u64) -> BackendRefinement {
        BackendRefinement::Value {
            value: value.to_string(),
            count,
        }
    }

    #[test]
    fn test_search_batch_order_and_shared_recall_id() {
        let mut state = StoreState::default();
        state.session.config.search.use_default_collection = true;

        let actions = search(Some("red shoes".to_string())).resolve(&state);
        assert_eq!(
            actions,
            vec![
                Action::ResetPage,
                Action::SelectCollection("default".to_string()),
                Action::ResetRefinements(ResetTarget::All),
                Action::UpdateQuery(Some("red shoes".to_string())),
            ]
        );

        let mut ids = SequentialIds::default();
        let envelopes = stamp_correlation_ids(actions, &mut ids);
        let recall_ids: Vec<_> = envelopes
            .iter()
            .map(|envelope| envelope.meta.recall_id.clone())
            .collect();
        assert_eq!(recall_ids, vec![Some("id-1".to_string()); 4]);
    }

    #[test]
    fn test_search_without_query_repeats_current() {
        let mut state = StoreState::default();
        state.data.query.original = Some("boots".to_string());

        let actions = search(None).resolve(&state);
        assert_eq!(
            actions,
            vec![
                Action::ResetPage,
                Action::ResetRefinements(ResetTarget::All),
                Action::UpdateQuery(Some("boots".to_string())),
            ]
        );
    }

    #[test]
    fn test_update_search_shapes() {
        let state = StoreState::default();

        let actions = update_search(SearchUpdate {
            query: Some(Some("shoes".to_string())),
            clear: Some(ResetTarget::All),
            ..SearchUpdate::default()
        })
        .resolve(&state);
        assert_eq!(
            actions,
            vec![
                Action::ResetPage,
                Action::UpdateQuery(Some("shoes".to_string())),
                Action::ResetRefinements(ResetTarget::All),
            ]
        );

        // index wins over value
        let actions = update_search(SearchUpdate {
            navigation_id: Some("brand".to_string()),
            index: Some(2),
            value: Some("Nike".to_string()),
            ..SearchUpdate::default()
        })
        .resolve(&state);
        assert_eq!(actions, vec![Action::ResetPage, select_refinement("brand", 2)]);

        let actions = update_search(SearchUpdate {
            navigation_id: Some("price".to_string()),
            range: Some((10.0, 20.0)),
            value: Some("cheap".to_string()),
            ..SearchUpdate::default()
        })
        .resolve(&state);
        assert_eq!(
            actions,
            vec![Action::ResetPage, add_range_refinement("price", 10.0, 20.0)]
        );

        // a value without navigation is ignored
        let actions = update_search(SearchUpdate {
            value: Some("Nike".to_string()),
            ..SearchUpdate::default()
        })
        .resolve(&state);
        assert_eq!(actions, vec![Action::ResetPage]);
    }

    #[test]
    fn test_switch_refinement() {
        let actions = switch_refinement("brand", Refinement::value("Nike")).resolve(&StoreState::default());
        assert_eq!(
            actions,
            vec![
                Action::ResetPage,
                Action::ResetRefinements(ResetTarget::Field("brand".to_string())),
                add_refinement("brand", "Nike"),
            ]
        );
    }

    #[test]
    fn test_reset_recall_appends_selection() {
        let target = IndexTarget {
            navigation_id: "brand".to_string(),
            index: 1,
        };
        let actions =
            reset_recall(Some("shoes".to_string()), Some(target.clone())).resolve(&StoreState::default());
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[2], Action::UpdateQuery(Some("shoes".to_string())));
        assert_eq!(actions[3], Action::SelectRefinement(target));
    }

    #[test]
    fn test_receive_products_fans_out() {
        let mut state = StoreState::default();
        state.data.page.current = 3;
        let request = SearchRequest {
            query: Some("shoes".to_string()),
            ..SearchRequest::default()
        };
        let response = SearchResponse {
            total_record_count: 41,
            records: vec![Record {
                id: Some("1".to_string()),
                ..Record::default()
            }],
            available_navigation: vec![BackendNavigation {
                name: "brand".to_string(),
                refinements: vec![value("Nike", 20), value("Vans", 21)],
                ..BackendNavigation::default()
            }],
            ..SearchResponse::default()
        };

        let actions = receive_products(request.clone(), Ok(response)).resolve(&state);
        let names: Vec<_> = actions.iter().map(Action::name).collect();
        assert_eq!(
            names,
            vec![
                "RECEIVE_PRODUCTS",
                "RECEIVE_QUERY",
                "RECEIVE_PRODUCT_RECORDS",
                "RECEIVE_NAVIGATIONS",
                "RECEIVE_RECORD_COUNT",
                "RECEIVE_PAGE",
                "RECEIVE_TEMPLATE",
                "RECEIVE_COLLECTION_COUNT",
            ]
        );
        match &actions[5] {
            Action::ReceivePage(window) => {
                assert_eq!((window.from, window.to, window.last), (21, 30, 5));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            actions[7],
            Action::ReceiveCollectionCount(Ok(CollectionCount {
                collection: "default".to_string(),
                count: 41
            }))
        );
    }

    #[test]
    fn test_receive_products_redirect_short_circuits() {
        let response = SearchResponse {
            redirect: Some("/sale".to_string()),
            ..SearchResponse::default()
        };
        let actions =
            receive_products(SearchRequest::default(), Ok(response)).resolve(&StoreState::default());
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1], Action::ReceiveRedirect("/sale".to_string()));
    }

    #[test]
    fn test_receive_products_error_is_single_action() {
        let actions = receive_products(SearchRequest::default(), Err(FetchError::bridge("down")))
            .resolve(&StoreState::default());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].fetch_flag(), Some((RequestKind::Search, false)));
        assert!(actions[0].fetch_error().is_some());
    }

    #[test]
    fn test_receive_more_refinements_keeps_selection() {
        let mut state = StoreState::default();
        state.data.navigations.insert(
            "brand".to_string(),
            Navigation {
                refinements: vec![Refinement::value("Nike"), Refinement::value("Vans")],
                selected: vec![1],
                more: true,
                ..Navigation::new("brand")
            },
        );
        let response = RefinementsResponse {
            navigation: BackendNavigation {
                name: "brand".to_string(),
                refinements: vec![value("Adidas", 1), value("Nike", 5), value("Vans", 2)],
                ..BackendNavigation::default()
            },
        };

        let actions = receive_more_refinements("brand".to_string(), Ok(response)).resolve(&state);
        match &actions[..] {
            [Action::ReceiveMoreRefinements(Ok(more))] => {
                assert_eq!(more.refinements.len(), 3);
                assert_eq!(more.selected, vec![2]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
