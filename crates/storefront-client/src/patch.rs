//! Layered request overrides
//!
//! Every request is assembled in four stages, later stages winning:
//!
//! ```text
//! computed base → defaults → per-call override → overrides
//! ```
//!
//! `defaults` and `overrides` come from configuration, the per-call override
//! is supplied by whoever builds the request.

use crate::types::{AutocompletePatch, AutocompleteRequest, SearchRequest, SearchRequestPatch};
use serde::{Deserialize, Serialize};

/// A shallow, field-wise patch over a request type
pub trait RequestPatch {
    type Request;

    /// Overwrite every field of `request` this patch sets
    fn apply_to(&self, request: &mut Self::Request);
}

/// Configured defaults and overrides for one request section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestLayers<P> {
    pub defaults: P,
    pub overrides: P,
}

impl<P: RequestPatch> RequestLayers<P> {
    /// Run `base` through the full override chain
    pub fn compose(&self, base: P::Request, call_override: Option<&P>) -> P::Request {
        let mut request = base;
        self.defaults.apply_to(&mut request);
        if let Some(patch) = call_override {
            patch.apply_to(&mut request);
        }
        self.overrides.apply_to(&mut request);
        request
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}

impl RequestPatch for SearchRequestPatch {
    type Request = SearchRequest;

    fn apply_to(&self, request: &mut SearchRequest) {
        set(&mut request.area, &self.area);
        set(&mut request.collection, &self.collection);
        set_opt(&mut request.language, &self.language);
        set_opt(&mut request.query, &self.query);
        set(&mut request.refinements, &self.refinements);
        set(&mut request.skip, &self.skip);
        set(&mut request.page_size, &self.page_size);
        set_opt(&mut request.sort, &self.sort);
        set(&mut request.fields, &self.fields);
        set(&mut request.prune_refinements, &self.prune_refinements);
        set(
            &mut request.disable_autocorrection,
            &self.disable_autocorrection,
        );
        set_opt(&mut request.match_strategy_name, &self.match_strategy_name);
        set(&mut request.custom_url_params, &self.custom_url_params);
    }
}

impl RequestPatch for AutocompletePatch {
    type Request = AutocompleteRequest;

    fn apply_to(&self, request: &mut AutocompleteRequest) {
        set(&mut request.collection, &self.collection);
        set(&mut request.area, &self.area);
        set_opt(&mut request.language, &self.language);
        set(&mut request.num_search_terms, &self.num_search_terms);
        set(&mut request.num_navigations, &self.num_navigations);
        set(&mut request.sort_alphabetically, &self.sort_alphabetically);
        set(&mut request.fuzzy_matching, &self.fuzzy_matching);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_order() {
        let layers = RequestLayers {
            defaults: SearchRequestPatch {
                area: Some("Staging".to_string()),
                page_size: Some(50),
                ..Default::default()
            },
            overrides: SearchRequestPatch {
                page_size: Some(12),
                ..Default::default()
            },
        };
        let call = SearchRequestPatch {
            area: Some("Preview".to_string()),
            collection: Some("sale".to_string()),
            page_size: Some(30),
            ..Default::default()
        };

        let request = layers.compose(SearchRequest::default(), Some(&call));

        // per-call beats defaults, overrides beat everything
        assert_eq!(request.area, "Preview");
        assert_eq!(request.collection, "sale");
        assert_eq!(request.page_size, 12);
    }

    #[test]
    fn test_defaults_do_not_beat_base_when_unset() {
        let layers: RequestLayers<SearchRequestPatch> = RequestLayers::default();
        let base = SearchRequest {
            query: Some("lamp".to_string()),
            ..SearchRequest::default()
        };
        assert_eq!(layers.compose(base.clone(), None), base);
    }

    #[test]
    fn test_autocomplete_patch() {
        let mut request = AutocompleteRequest {
            query: "sho".to_string(),
            collection: "default".to_string(),
            area: "Production".to_string(),
            language: None,
            num_search_terms: 5,
            num_navigations: 5,
            sort_alphabetically: false,
            fuzzy_matching: false,
        };
        AutocompletePatch {
            num_search_terms: Some(8),
            fuzzy_matching: Some(true),
            ..Default::default()
        }
        .apply_to(&mut request);
        assert_eq!(request.num_search_terms, 8);
        assert!(request.fuzzy_matching);
        assert_eq!(request.num_navigations, 5);
    }
}
