//! Storefront facade
//!
//! The entry point UI code holds on to. It owns a fully wired [`Store`]
//! (logging, validation and effects middleware) and exposes one method per
//! user intent. Every intent that changes the next search request is followed
//! by a products fetch; intents rejected by the validators fetch nothing.

use crate::actions::{creators, Dispatchable, IndexTarget, ResetTarget, SearchUpdate};
use crate::middleware::{EffectsMiddleware, LoggingMiddleware, ValidationMiddleware};
use crate::observer::Event;
use crate::state::{Refinement, StoreState};
use crate::store::Store;
use std::sync::Arc;
use std::time::{Duration, Instant};
use storefront_client::{AutocompleteClient, SearchBridge, SelectedRefinement};
use storefront_config::Configuration;

pub struct Storefront {
    store: Store,
}

impl Storefront {
    pub fn new(
        config: Configuration,
        bridge: Arc<dyn SearchBridge>,
        autocomplete: Arc<dyn AutocompleteClient>,
    ) -> anyhow::Result<Self> {
        let mut store = Store::new(StoreState::from_config(config));
        store.add_middleware(Box::new(LoggingMiddleware::new()));
        store.add_middleware(Box::new(ValidationMiddleware::new()));
        store.add_middleware(Box::new(EffectsMiddleware::new(bridge, autocomplete)?));

        log::info!("Storefront ready");
        Ok(Self { store })
    }

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    /// Receive every change event
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Event) + Send + 'static) {
        self.store.subscribe(subscriber);
    }

    /// Receive change events with the given name only
    pub fn on(&mut self, name: impl Into<String>, mut subscriber: impl FnMut(&Event) + Send + 'static) {
        let name = name.into();
        self.store.subscribe(move |event| {
            if event.name() == name {
                subscriber(event);
            }
        });
    }

    /// Dispatch any unit without the automatic products fetch
    pub fn dispatch(&mut self, dispatchable: impl Into<Dispatchable>) {
        self.store.dispatch(dispatchable);
    }

    /// New search for `query`, or the current query when `None`
    pub fn search(&mut self, query: Option<String>) {
        self.dispatch_search(creators::search(query));
    }

    pub fn refine(&mut self, navigation_id: impl Into<String>, value: impl Into<String>) {
        self.dispatch_search(creators::update_search(SearchUpdate {
            navigation_id: Some(navigation_id.into()),
            value: Some(value.into()),
            ..SearchUpdate::default()
        }));
    }

    pub fn refine_range(&mut self, navigation_id: impl Into<String>, low: f64, high: f64) {
        self.dispatch_search(creators::update_search(SearchUpdate {
            navigation_id: Some(navigation_id.into()),
            range: Some((low, high)),
            ..SearchUpdate::default()
        }));
    }

    /// Select an already known refinement by position
    pub fn select(&mut self, navigation_id: impl Into<String>, index: usize) {
        self.dispatch_search(creators::update_search(SearchUpdate {
            navigation_id: Some(navigation_id.into()),
            index: Some(index),
            ..SearchUpdate::default()
        }));
    }

    pub fn unrefine(&mut self, navigation_id: impl Into<String>, index: usize) {
        self.dispatch_search(creators::deselect_refinement(navigation_id, index));
    }

    /// Clear the refinements of one navigation, or all of them
    pub fn reset(&mut self, field: Option<String>) {
        let target = match field {
            Some(field) => ResetTarget::Field(field),
            None => ResetTarget::All,
        };
        self.dispatch_search(creators::update_search(SearchUpdate {
            clear: Some(target),
            ..SearchUpdate::default()
        }));
    }

    pub fn switch_refinement(&mut self, navigation_id: impl Into<String>, refinement: Refinement) {
        self.dispatch_search(creators::switch_refinement(navigation_id, refinement));
    }

    /// Start over, optionally with one refinement preselected
    pub fn reset_recall(&mut self, query: Option<String>, select: Option<IndexTarget>) {
        self.dispatch_search(creators::reset_recall(query, select));
    }

    pub fn resize(&mut self, page_size: u64) {
        self.dispatch_search(creators::update_page_size(page_size));
    }

    pub fn sort(&mut self, index: usize) {
        self.dispatch_search(creators::select_sort(index));
    }

    pub fn switch_collection(&mut self, collection: impl Into<String>) {
        self.dispatch_search(creators::select_collection(collection));
    }

    pub fn page(&mut self, page: u64) {
        self.dispatch_search(creators::update_current_page(page));
    }

    pub fn more_refinements(&mut self, navigation_id: impl Into<String>) {
        self.store.dispatch(creators::fetch_more_refinements(navigation_id));
    }

    pub fn more_products(&mut self, amount: u64) {
        self.store.dispatch(creators::fetch_more_products(amount));
    }

    /// Track the partial query and fetch suggestions for it
    pub fn autocomplete(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.store.dispatch(creators::update_autocomplete_query(query.clone()));
        if !query.is_empty() {
            self.store.dispatch(creators::fetch_autocomplete_suggestions(query));
        }
    }

    pub fn autocomplete_products(&mut self, query: impl Into<String>, refinements: Vec<SelectedRefinement>) {
        self.store
            .dispatch(creators::fetch_autocomplete_products(query, refinements));
    }

    pub fn details(&mut self, id: impl Into<String>) {
        self.store.dispatch(creators::fetch_product_details(id));
    }

    /// Fetch the record count the current search has in another collection
    pub fn count_records(&mut self, collection: impl Into<String>) {
        self.store.dispatch(creators::fetch_collection_count(collection));
    }

    /// Apply completions until no fetch is in flight
    ///
    /// Returns `false` if `timeout` passed first.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.store.poll();
            if self.store.dispatcher().in_flight() == 0 {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                log::warn!(
                    "Gave up waiting for {} fetches",
                    self.store.dispatcher().in_flight()
                );
                return false;
            }
            self.store.pump(deadline - now);
        }
    }

    fn dispatch_search(&mut self, dispatchable: impl Into<Dispatchable>) {
        let before = self.state().session.search_id.clone();
        self.store.dispatch(dispatchable);
        if self.state().session.search_id != before {
            self.store.dispatch(creators::fetch_products());
        } else {
            log::debug!("Search unchanged, not fetching");
        }
    }
}
