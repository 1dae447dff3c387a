//! Effects Middleware
//!
//! Turns fetch intents into backend calls:
//! - search, more products and collection counts through the search bridge
//! - the full refinement list of one navigation
//! - autocomplete suggestions and product previews
//! - single product details
//!
//! Requests are built from the state at the time the intent is handled. The
//! result comes back as the matching receive action, queued under a ticket so
//! that only the latest run per request kind is applied.

use crate::actions::{creators, Action, CollectionCount, Dispatchable, Envelope};
use crate::adapters::{augment_products, extract_autocomplete};
use crate::dispatcher::{Dispatcher, EffectKey};
use crate::error::FetchError;
use crate::middleware::Middleware;
use crate::requests;
use crate::state::{RequestKind, StoreState};
use std::future::Future;
use std::sync::Arc;
use storefront_client::{AutocompleteClient, SearchBridge, SelectedRefinement};
use tokio::runtime::{Builder, Runtime};

/// Middleware running backend requests on its own runtime
pub struct EffectsMiddleware {
    /// Tokio runtime for async operations
    runtime: Runtime,
    bridge: Arc<dyn SearchBridge>,
    autocomplete: Arc<dyn AutocompleteClient>,
}

impl EffectsMiddleware {
    pub fn new(
        bridge: Arc<dyn SearchBridge>,
        autocomplete: Arc<dyn AutocompleteClient>,
    ) -> anyhow::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .thread_name("storefront-effects")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            bridge,
            autocomplete,
        })
    }

    /// Run `task` and hand its result back under a fresh ticket for `key`
    fn spawn<F>(&self, key: EffectKey, dispatcher: &Dispatcher, task: F)
    where
        F: Future<Output = Dispatchable> + Send + 'static,
    {
        let pending = dispatcher.begin(key);

        if let Some(ticket) = pending.ticket() {
            log::debug!(
                "Spawning effect {:?} (generation {})",
                ticket.key,
                ticket.generation
            );
        }
        self.runtime.spawn(async move {
            let completion = task.await;
            pending.complete(completion);
        });
    }

    fn fetch_products(&self, state: &StoreState, dispatcher: &Dispatcher) {
        let request = requests::search(state, None);
        let bridge = Arc::clone(&self.bridge);

        self.spawn(
            EffectKey::Request(RequestKind::Search),
            dispatcher,
            async move {
                let result = bridge.search(&request).await.map_err(FetchError::from);
                if let Err(e) = &result {
                    log::error!("Search failed: {}", e);
                }
                creators::receive_products(request, result)
            },
        );
    }

    fn fetch_more_products(&self, amount: u64, state: &StoreState, dispatcher: &Dispatcher) {
        let request = match requests::more_products(state, amount) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Not fetching more products: {}", e);
                dispatcher.dispatch(creators::receive_more_products(Err(e.into())));
                return;
            }
        };
        let bridge = Arc::clone(&self.bridge);

        self.spawn(
            EffectKey::Request(RequestKind::MoreProducts),
            dispatcher,
            async move {
                let result = bridge
                    .search(&request)
                    .await
                    .map(|response| augment_products(&response.records))
                    .map_err(FetchError::from);
                creators::receive_more_products(result).into()
            },
        );
    }

    fn fetch_more_refinements(&self, navigation_id: &str, state: &StoreState, dispatcher: &Dispatcher) {
        let request = match requests::more_refinements(state, navigation_id) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Not fetching refinements: {}", e);
                dispatcher.dispatch(Action::ReceiveMoreRefinements(Err(e.into())));
                return;
            }
        };
        let bridge = Arc::clone(&self.bridge);
        let navigation_id = navigation_id.to_string();

        self.spawn(
            EffectKey::Request(RequestKind::MoreRefinements),
            dispatcher,
            async move {
                let result = bridge
                    .refinements(&request, &navigation_id)
                    .await
                    .map_err(FetchError::from);
                creators::receive_more_refinements(navigation_id, result)
            },
        );
    }

    fn fetch_autocomplete_suggestions(&self, query: &str, state: &StoreState, dispatcher: &Dispatcher) {
        let request = requests::autocomplete_suggestions(state, query);
        let category_field = state.session.config.autocomplete.category_field.clone();
        let autocomplete = Arc::clone(&self.autocomplete);

        self.spawn(
            EffectKey::Request(RequestKind::AutocompleteSuggestions),
            dispatcher,
            async move {
                let result = autocomplete
                    .suggestions(&request)
                    .await
                    .map(|response| extract_autocomplete(&response, category_field.as_deref()))
                    .map_err(FetchError::from);
                creators::receive_autocomplete_suggestions(result).into()
            },
        );
    }

    fn fetch_autocomplete_products(
        &self,
        query: &str,
        refinements: &[SelectedRefinement],
        state: &StoreState,
        dispatcher: &Dispatcher,
    ) {
        let request = requests::autocomplete_products(state, query, refinements);
        let bridge = Arc::clone(&self.bridge);

        self.spawn(
            EffectKey::Request(RequestKind::AutocompleteProducts),
            dispatcher,
            async move {
                let result = bridge
                    .search(&request)
                    .await
                    .map(|response| augment_products(&response.records))
                    .map_err(FetchError::from);
                creators::receive_autocomplete_products(result).into()
            },
        );
    }

    fn fetch_product_details(&self, id: &str, state: &StoreState, dispatcher: &Dispatcher) {
        let request = requests::details(state, id);
        let bridge = Arc::clone(&self.bridge);
        let id = id.to_string();

        self.spawn(
            EffectKey::Request(RequestKind::Details),
            dispatcher,
            async move {
                let result = match bridge.search(&request).await {
                    Ok(response) => augment_products(&response.records)
                        .into_iter()
                        .next()
                        .ok_or_else(|| FetchError::action(format!("no product with id '{}'", id))),
                    Err(e) => Err(FetchError::from(e)),
                };
                creators::receive_details_product(result).into()
            },
        );
    }

    fn fetch_collection_count(&self, collection: &str, state: &StoreState, dispatcher: &Dispatcher) {
        let request = requests::collection_count(state, collection);
        let bridge = Arc::clone(&self.bridge);
        let collection = collection.to_string();

        self.spawn(
            EffectKey::CollectionCount(collection.clone()),
            dispatcher,
            async move {
                let result = bridge
                    .search(&request)
                    .await
                    .map(|response| CollectionCount {
                        collection,
                        count: response.total_record_count,
                    })
                    .map_err(FetchError::from);
                creators::receive_collection_count(result).into()
            },
        );
    }
}

impl Middleware for EffectsMiddleware {
    fn handle(&mut self, envelope: &Envelope, state: &StoreState, dispatcher: &Dispatcher) -> bool {
        match &envelope.action {
            Action::FetchProducts => self.fetch_products(state, dispatcher),
            Action::FetchMoreProducts(amount) => self.fetch_more_products(*amount, state, dispatcher),
            Action::FetchMoreRefinements(navigation_id) => {
                self.fetch_more_refinements(navigation_id, state, dispatcher)
            }
            Action::FetchAutocompleteSuggestions(query) => {
                self.fetch_autocomplete_suggestions(query, state, dispatcher)
            }
            Action::FetchAutocompleteProducts { query, refinements } => {
                self.fetch_autocomplete_products(query, refinements, state, dispatcher)
            }
            Action::FetchProductDetails(id) => self.fetch_product_details(id, state, dispatcher),
            Action::FetchCollectionCount(collection) => {
                self.fetch_collection_count(collection, state, dispatcher)
            }
            _ => {}
        }

        // intents still reach the reducers to raise their fetching flags
        true
    }
}
