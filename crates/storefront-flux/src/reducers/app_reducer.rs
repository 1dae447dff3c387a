use crate::actions::{Action, Envelope};
use crate::reducers::{
    autocomplete_reducer, collections_reducer, details_reducer, is_fetching_reducer,
    navigations_reducer, page_reducer, products_reducer, query_reducer, session_reducer,
    sorts_reducer, ui_reducer,
};
use crate::state::{Data, StoreState};

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
pub fn reduce(mut state: StoreState, envelope: &Envelope) -> StoreState {
    if let Action::RefreshState(next) = &envelope.action {
        // Session and live autocomplete survive a wholesale replacement
        let mut next = next.as_ref().clone();
        next.session = state.session;
        next.data.autocomplete = state.data.autocomplete;
        log::debug!("State refreshed");
        return next;
    }

    state.session = session_reducer::reduce(state.session, envelope);
    state.data = reduce_data(state.data, &envelope.action);
    state.ui = ui_reducer::reduce(state.ui, &envelope.action);
    state
}

fn reduce_data(mut data: Data, action: &Action) -> Data {
    data.query = query_reducer::reduce(data.query, action);
    data.sorts = sorts_reducer::reduce(data.sorts, action);
    data.products = products_reducer::reduce(data.products, action);
    data.collections = collections_reducer::reduce(data.collections, action);
    data.navigations = navigations_reducer::reduce(data.navigations, action);
    data.autocomplete = autocomplete_reducer::reduce(data.autocomplete, action);
    data.page = page_reducer::reduce(data.page, action);
    data.details = details_reducer::reduce(data.details, action);
    data.is_fetching = is_fetching_reducer::reduce(data.is_fetching, action);

    match action {
        Action::ReceiveProducts(Ok(received)) => {
            // a redirect response carries no products to show
            if received.response.redirect.is_none() {
                data.products_loaded = true;
            }
            data.redirect = None;
            data.warnings = received.response.warnings.clone();
        }
        Action::ReceiveProductRecords(_) => {
            data.products_loaded = true;
        }
        Action::ReceiveRecordCount(count) => {
            data.record_count = *count;
        }
        Action::ReceiveTemplate(template) => {
            data.template = template.clone();
        }
        Action::ReceiveRedirect(url) => {
            log::info!("Search redirects to {}", url);
            data.redirect = Some(url.clone());
        }
        _ => {}
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Meta, ProductsReceived};
    use crate::error::FetchError;
    use crate::state::RequestKind;
    use pretty_assertions::assert_eq;
    use storefront_client::{SearchRequest, SearchResponse};

    #[test]
    fn test_refresh_state_preserves_session_and_autocomplete() {
        let mut state = StoreState::default();
        state.session.recall_id = Some("recall".to_string());
        state.data.autocomplete.query = "sho".to_string();

        let mut incoming = StoreState::default();
        incoming.data.record_count = 99;
        incoming.data.autocomplete.query = "stale".to_string();
        incoming.session.recall_id = Some("server".to_string());

        let next = reduce(
            state,
            &Action::RefreshState(Box::new(incoming)).into(),
        );
        assert_eq!(next.data.record_count, 99);
        assert_eq!(next.data.autocomplete.query, "sho");
        assert_eq!(next.session.recall_id.as_deref(), Some("recall"));
    }

    #[test]
    fn test_meta_ids_reach_session() {
        let envelope = Envelope {
            action: Action::UpdateQuery(Some("shoes".into())),
            meta: Meta {
                recall_id: Some("r1".into()),
                search_id: Some("s1".into()),
            },
        };
        let state = reduce(StoreState::default(), &envelope);
        assert_eq!(state.session.recall_id.as_deref(), Some("r1"));
        assert_eq!(state.session.search_id.as_deref(), Some("s1"));
        assert_eq!(state.data.query.original.as_deref(), Some("shoes"));
    }

    #[test]
    fn test_receive_products_records_request() {
        let request = SearchRequest {
            query: Some("shoes".into()),
            ..SearchRequest::default()
        };
        let state = reduce(StoreState::default(), &Action::FetchProducts.into());
        assert!(state.data.is_fetching.get(RequestKind::Search));

        let state = reduce(
            state,
            &Action::ReceiveProducts(Ok(ProductsReceived {
                request: request.clone(),
                response: SearchResponse {
                    warnings: vec!["slow".into()],
                    ..SearchResponse::default()
                },
            }))
            .into(),
        );
        assert!(!state.data.is_fetching.get(RequestKind::Search));
        assert!(state.data.products_loaded);
        assert_eq!(state.data.warnings, vec!["slow"]);
        assert_eq!(state.session.last_search_request, Some(request));
    }

    #[test]
    fn test_redirect_response_leaves_products_unloaded() {
        let state = reduce(
            StoreState::default(),
            &Action::ReceiveProducts(Ok(ProductsReceived {
                request: SearchRequest::default(),
                response: SearchResponse {
                    redirect: Some("/sale".into()),
                    ..SearchResponse::default()
                },
            }))
            .into(),
        );
        let state = reduce(state, &Action::ReceiveRedirect("/sale".into()).into());

        assert!(!state.data.products_loaded);
        assert_eq!(state.data.redirect.as_deref(), Some("/sale"));
    }

    #[test]
    fn test_errored_receive_only_clears_flag() {
        let fetching = reduce(StoreState::default(), &Action::FetchProducts.into());
        let next = reduce(
            fetching.clone(),
            &Action::ReceiveProducts(Err(FetchError::bridge("down"))).into(),
        );

        let mut expected = fetching;
        expected.data.is_fetching.set(RequestKind::Search, false);
        assert_eq!(next, expected);
    }
}
