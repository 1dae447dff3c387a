//! Change Observer
//!
//! Diffs two consecutive state snapshots and reports one [`Event`] per
//! changed path of interest. The walk mirrors the state's shape and only
//! descends into a subtree when it differs between the snapshots, so an
//! unchanged subtree never produces events no matter what changed around it.

use crate::error::{ErrorOrigin, FetchError};
use crate::state::{Autocomplete, Collections, Data, Indexed, Navigation, Page, Query, StoreState, UiState};

/// Change notification for the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ProductsUpdated,
    MoreProductsAdded,
    QueryUpdated,
    OriginalQueryUpdated,
    CorrectedQueryUpdated,
    RelatedQueriesUpdated,
    DidYouMeanUpdated,
    QueryRewritesUpdated,
    SortUpdated,
    CollectionUpdated(String),
    SelectedCollectionUpdated,
    NavigationsUpdated,
    SelectedRefinementsUpdated(String),
    PageUpdated,
    PageSizeUpdated,
    CurrentPageUpdated,
    RecordCountUpdated,
    AutocompleteUpdated,
    AutocompleteQueryUpdated,
    AutocompleteProductsUpdated,
    DetailsUpdated,
    TemplateUpdated,
    Redirect(String),
    RecallChanged,
    SearchChanged,
    UiUpdated { tag: String, id: String },
    BridgeError(FetchError),
    FetchActionError(FetchError),
}

impl Event {
    /// Subscription name, e.g. `selected_refinements_updated:brand`
    pub fn name(&self) -> String {
        match self {
            Event::ProductsUpdated => "products_updated".to_string(),
            Event::MoreProductsAdded => "more_products_added".to_string(),
            Event::QueryUpdated => "query_updated".to_string(),
            Event::OriginalQueryUpdated => "original_query_updated".to_string(),
            Event::CorrectedQueryUpdated => "corrected_query_updated".to_string(),
            Event::RelatedQueriesUpdated => "related_queries_updated".to_string(),
            Event::DidYouMeanUpdated => "did_you_mean_updated".to_string(),
            Event::QueryRewritesUpdated => "query_rewrites_updated".to_string(),
            Event::SortUpdated => "sort_updated".to_string(),
            Event::CollectionUpdated(name) => format!("collection_updated:{}", name),
            Event::SelectedCollectionUpdated => "selected_collection_updated".to_string(),
            Event::NavigationsUpdated => "navigations_updated".to_string(),
            Event::SelectedRefinementsUpdated(field) => {
                format!("selected_refinements_updated:{}", field)
            }
            Event::PageUpdated => "page_updated".to_string(),
            Event::PageSizeUpdated => "page_size_updated".to_string(),
            Event::CurrentPageUpdated => "current_page_updated".to_string(),
            Event::RecordCountUpdated => "record_count_updated".to_string(),
            Event::AutocompleteUpdated => "autocomplete_updated".to_string(),
            Event::AutocompleteQueryUpdated => "autocomplete_query_updated".to_string(),
            Event::AutocompleteProductsUpdated => "autocomplete_products_updated".to_string(),
            Event::DetailsUpdated => "details_updated".to_string(),
            Event::TemplateUpdated => "template_updated".to_string(),
            Event::Redirect(_) => "redirect".to_string(),
            Event::RecallChanged => "recall_changed".to_string(),
            Event::SearchChanged => "search_changed".to_string(),
            Event::UiUpdated { tag, id } => format!("ui:updated:{}:{}", tag, id),
            Event::BridgeError(_) => "error:bridge".to_string(),
            Event::FetchActionError(_) => "error:fetch_action".to_string(),
        }
    }

    /// Error event for a failed fetch
    pub fn from_fetch_error(error: &FetchError) -> Self {
        match error.origin {
            ErrorOrigin::Bridge => Event::BridgeError(error.clone()),
            ErrorOrigin::Action => Event::FetchActionError(error.clone()),
        }
    }
}

/// Report every change between `old` and `new`
pub fn observe(old: &StoreState, new: &StoreState, emit: &mut dyn FnMut(Event)) {
    if old == new {
        return;
    }

    if old.data != new.data {
        observe_data(&old.data, &new.data, emit);
    }

    if old.session.recall_id != new.session.recall_id {
        emit(Event::RecallChanged);
    }
    if old.session.search_id != new.session.search_id {
        emit(Event::SearchChanged);
    }

    if old.ui != new.ui {
        observe_ui(&old.ui, &new.ui, emit);
    }
}

fn observe_data(old: &Data, new: &Data, emit: &mut dyn FnMut(Event)) {
    if old.products != new.products {
        let appended = new.products.len() > old.products.len()
            && new.products.starts_with(&old.products)
            && !old.products.is_empty();
        emit(if appended {
            Event::MoreProductsAdded
        } else {
            Event::ProductsUpdated
        });
    }

    if old.query != new.query {
        observe_query(&old.query, &new.query, emit);
    }

    if old.sorts != new.sorts {
        emit(Event::SortUpdated);
    }

    if old.collections != new.collections {
        observe_collections(&old.collections, &new.collections, emit);
    }

    if old.navigations != new.navigations {
        observe_navigations(&old.navigations, &new.navigations, emit);
    }

    if old.page != new.page {
        observe_page(&old.page, &new.page, emit);
    }

    if old.record_count != new.record_count {
        emit(Event::RecordCountUpdated);
    }

    if old.autocomplete != new.autocomplete {
        observe_autocomplete(&old.autocomplete, &new.autocomplete, emit);
    }

    if old.details != new.details {
        emit(Event::DetailsUpdated);
    }

    if old.template != new.template {
        emit(Event::TemplateUpdated);
    }

    if old.redirect != new.redirect {
        if let Some(url) = &new.redirect {
            emit(Event::Redirect(url.clone()));
        }
    }
}

fn observe_query(old: &Query, new: &Query, emit: &mut dyn FnMut(Event)) {
    emit(Event::QueryUpdated);
    if old.original != new.original {
        emit(Event::OriginalQueryUpdated);
    }
    if old.corrected != new.corrected {
        emit(Event::CorrectedQueryUpdated);
    }
    if old.related != new.related {
        emit(Event::RelatedQueriesUpdated);
    }
    if old.did_you_mean != new.did_you_mean {
        emit(Event::DidYouMeanUpdated);
    }
    if old.rewrites != new.rewrites {
        emit(Event::QueryRewritesUpdated);
    }
}

fn observe_collections(old: &Collections, new: &Collections, emit: &mut dyn FnMut(Event)) {
    if old.selected != new.selected {
        emit(Event::SelectedCollectionUpdated);
    }
    if old.items != new.items {
        for name in &new.items.all_ids {
            if old.items.get(name) != new.items.get(name) {
                emit(Event::CollectionUpdated(name.clone()));
            }
        }
    }
}

fn observe_navigations(
    old: &Indexed<Navigation>,
    new: &Indexed<Navigation>,
    emit: &mut dyn FnMut(Event),
) {
    emit(Event::NavigationsUpdated);
    for navigation in new.iter() {
        let old_selected = old
            .get(&navigation.field)
            .map(|old| old.selected_refinements().collect::<Vec<_>>())
            .unwrap_or_default();
        let new_selected: Vec<_> = navigation.selected_refinements().collect();
        if old_selected != new_selected {
            emit(Event::SelectedRefinementsUpdated(navigation.field.clone()));
        }
    }
    for removed in old.iter().filter(|navigation| !new.contains(&navigation.field)) {
        if !removed.selected.is_empty() {
            emit(Event::SelectedRefinementsUpdated(removed.field.clone()));
        }
    }
}

fn observe_page(old: &Page, new: &Page, emit: &mut dyn FnMut(Event)) {
    emit(Event::PageUpdated);
    if old.sizes != new.sizes {
        emit(Event::PageSizeUpdated);
    }
    if old.current != new.current {
        emit(Event::CurrentPageUpdated);
    }
}

fn observe_autocomplete(old: &Autocomplete, new: &Autocomplete, emit: &mut dyn FnMut(Event)) {
    emit(Event::AutocompleteUpdated);
    if old.query != new.query {
        emit(Event::AutocompleteQueryUpdated);
    }
    if old.products != new.products {
        emit(Event::AutocompleteProductsUpdated);
    }
}

fn observe_ui(old: &UiState, new: &UiState, emit: &mut dyn FnMut(Event)) {
    let tags = old.keys().chain(new.keys().filter(|tag| !old.contains_key(*tag)));
    for tag in tags {
        let old_components = old.get(tag);
        let new_components = new.get(tag);
        if old_components == new_components {
            continue;
        }

        let ids = old_components
            .into_iter()
            .chain(new_components)
            .flat_map(|components| components.keys())
            .collect::<std::collections::BTreeSet<_>>();
        for id in ids {
            let before = old_components.and_then(|components| components.get(id));
            let after = new_components.and_then(|components| components.get(id));
            if before != after {
                emit(Event::UiUpdated {
                    tag: tag.clone(),
                    id: id.clone(),
                });
            }
        }
    }
}
