//! Validators
//!
//! Predicates that keep invalid or no-op actions away from the reducers.
//! Each action type has a fixed set of checks, each applied to one part of
//! its payload. A failing action is dropped; this is never an error for the
//! caller.

use crate::actions::{Action, IndexTarget, RefinementTarget, ResetTarget};
use crate::adapters::refinements_match;
use crate::error::ValidationError;
use crate::selectors;
use crate::state::{Refinement, StoreState};

/// A predicate over part of an action payload
pub struct Validator<T: ?Sized> {
    pub func: fn(&T, &StoreState) -> bool,
    pub msg: &'static str,
}

impl<T: ?Sized> Validator<T> {
    pub fn check(&self, value: &T, state: &StoreState) -> Result<(), &'static str> {
        if (self.func)(value, state) {
            Ok(())
        } else {
            Err(self.msg)
        }
    }
}

fn is_string(value: &str, _: &StoreState) -> bool {
    !value.trim().is_empty()
}

pub const IS_STRING: Validator<str> = Validator {
    func: is_string,
    msg: "must be a non-empty string",
};

// `None` clears the query; an empty string does not
fn is_valid_query(query: &Option<String>, _: &StoreState) -> bool {
    query.as_deref().is_none_or(|query| !query.is_empty())
}

pub const IS_VALID_QUERY: Validator<Option<String>> = Validator {
    func: is_valid_query,
    msg: "query must be non-empty or null",
};

fn is_range_refinement(refinement: &Refinement, _: &StoreState) -> bool {
    matches!(refinement, Refinement::Range { low, high, .. } if low.is_finite() && high.is_finite())
}

pub const IS_RANGE_REFINEMENT: Validator<Refinement> = Validator {
    func: is_range_refinement,
    msg: "low and high values must be numeric",
};

fn is_valid_range(refinement: &Refinement, _: &StoreState) -> bool {
    matches!(refinement, Refinement::Range { low, high, .. } if low < high)
}

pub const IS_VALID_RANGE: Validator<Refinement> = Validator {
    func: is_valid_range,
    msg: "low value must be lower than high",
};

// A navigation that does not exist yet takes its kind from the refinement
fn is_matching_refinement_kind(target: &RefinementTarget, state: &StoreState) -> bool {
    selectors::navigation(state, &target.navigation_id).is_none_or(|navigation| {
        navigation.range == matches!(target.refinement, Refinement::Range { .. })
    })
}

pub const IS_MATCHING_REFINEMENT_KIND: Validator<RefinementTarget> = Validator {
    func: is_matching_refinement_kind,
    msg: "refinement kind must match the navigation",
};

fn is_refinement_deselected_by_value(target: &RefinementTarget, state: &StoreState) -> bool {
    match selectors::navigation(state, &target.navigation_id) {
        Some(navigation) => {
            let kind = navigation.kind();
            !navigation
                .selected_refinements()
                .any(|selected| refinements_match(selected, &target.refinement, kind))
        }
        None => true,
    }
}

pub const IS_REFINEMENT_DESELECTED_BY_VALUE: Validator<RefinementTarget> = Validator {
    func: is_refinement_deselected_by_value,
    msg: "refinement is already selected",
};

fn is_refinement_deselected_by_index(target: &IndexTarget, state: &StoreState) -> bool {
    selectors::navigation(state, &target.navigation_id).is_some_and(|navigation| {
        target.index < navigation.refinements.len() && !navigation.is_selected(target.index)
    })
}

pub const IS_REFINEMENT_DESELECTED_BY_INDEX: Validator<IndexTarget> = Validator {
    func: is_refinement_deselected_by_index,
    msg: "navigation must exist and refinement must not be selected",
};

fn is_refinement_selected_by_index(target: &IndexTarget, state: &StoreState) -> bool {
    selectors::navigation(state, &target.navigation_id)
        .is_some_and(|navigation| navigation.is_selected(target.index))
}

pub const IS_REFINEMENT_SELECTED_BY_INDEX: Validator<IndexTarget> = Validator {
    func: is_refinement_selected_by_index,
    msg: "navigation must exist and refinement must be selected",
};

fn has_selected_refinements_by_field(target: &ResetTarget, state: &StoreState) -> bool {
    match target {
        ResetTarget::All => true,
        ResetTarget::Field(field) => selectors::navigation(state, field)
            .is_some_and(|navigation| !navigation.selected.is_empty()),
    }
}

pub const HAS_SELECTED_REFINEMENTS_BY_FIELD: Validator<ResetTarget> = Validator {
    func: has_selected_refinements_by_field,
    msg: "navigation has no selected refinements",
};

fn not_on_first_page(_: &(), state: &StoreState) -> bool {
    selectors::current_page(state) != 1
}

pub const NOT_ON_FIRST_PAGE: Validator<()> = Validator {
    func: not_on_first_page,
    msg: "page must not be on first page",
};

fn is_valid_page(page: &u64, state: &StoreState) -> bool {
    *page >= 1 && *page <= selectors::page(state).last
}

pub const IS_VALID_PAGE: Validator<u64> = Validator {
    func: is_valid_page,
    msg: "page must be between 1 and the last page",
};

fn is_on_different_page(page: &u64, state: &StoreState) -> bool {
    *page != selectors::current_page(state)
}

pub const IS_ON_DIFFERENT_PAGE: Validator<u64> = Validator {
    func: is_on_different_page,
    msg: "page is already selected",
};

fn is_valid_page_size(size: &u64, state: &StoreState) -> bool {
    selectors::page(state).sizes.items.contains(size)
}

pub const IS_VALID_PAGE_SIZE: Validator<u64> = Validator {
    func: is_valid_page_size,
    msg: "page size must be one of the options",
};

fn is_different_page_size(size: &u64, state: &StoreState) -> bool {
    *size != selectors::page_size(state)
}

pub const IS_DIFFERENT_PAGE_SIZE: Validator<u64> = Validator {
    func: is_different_page_size,
    msg: "page size is already selected",
};

fn is_known_collection(collection: &str, state: &StoreState) -> bool {
    state.data.collections.items.contains(collection)
}

pub const IS_KNOWN_COLLECTION: Validator<str> = Validator {
    func: is_known_collection,
    msg: "collection must be one of the configured collections",
};

fn is_collection_deselected(collection: &str, state: &StoreState) -> bool {
    collection != selectors::collection(state)
}

pub const IS_COLLECTION_DESELECTED: Validator<str> = Validator {
    func: is_collection_deselected,
    msg: "collection is already selected",
};

fn is_sort_deselected(index: &usize, state: &StoreState) -> bool {
    *index < selectors::sorts(state).len() && *index != state.data.sorts.selected
}

pub const IS_SORT_DESELECTED: Validator<usize> = Validator {
    func: is_sort_deselected,
    msg: "sort must exist and not already be selected",
};

fn is_different_autocomplete_query(query: &str, state: &StoreState) -> bool {
    query != selectors::autocomplete_query(state)
}

pub const IS_DIFFERENT_AUTOCOMPLETE_QUERY: Validator<str> = Validator {
    func: is_different_autocomplete_query,
    msg: "autocomplete query is unchanged",
};

fn has_more_refinements(field: &str, state: &StoreState) -> bool {
    selectors::has_more_refinements(state, field)
}

pub const HAS_MORE_REFINEMENTS: Validator<str> = Validator {
    func: has_more_refinements,
    msg: "navigation has no more refinements",
};

fn is_valid_product_amount(amount: &u64, _: &StoreState) -> bool {
    *amount > 0
}

pub const IS_VALID_PRODUCT_AMOUNT: Validator<u64> = Validator {
    func: is_valid_product_amount,
    msg: "amount of products must be positive",
};

fn check_refinement(refinement: &Refinement, state: &StoreState) -> Result<(), &'static str> {
    match refinement {
        Refinement::Value { value, .. } => IS_STRING.check(value, state),
        Refinement::Range { .. } => {
            IS_RANGE_REFINEMENT.check(refinement, state)?;
            IS_VALID_RANGE.check(refinement, state)
        }
    }
}

fn run_checks(action: &Action, state: &StoreState) -> Result<(), &'static str> {
    match action {
        Action::UpdateQuery(query) => IS_VALID_QUERY.check(query, state),
        Action::AddRefinement(target) => {
            IS_STRING.check(&target.navigation_id, state)?;
            check_refinement(&target.refinement, state)?;
            IS_MATCHING_REFINEMENT_KIND.check(target, state)?;
            IS_REFINEMENT_DESELECTED_BY_VALUE.check(target, state)
        }
        Action::SelectRefinement(target) => {
            IS_STRING.check(&target.navigation_id, state)?;
            IS_REFINEMENT_DESELECTED_BY_INDEX.check(target, state)
        }
        Action::DeselectRefinement(target) => IS_REFINEMENT_SELECTED_BY_INDEX.check(target, state),
        Action::ResetRefinements(target) => HAS_SELECTED_REFINEMENTS_BY_FIELD.check(target, state),
        Action::ResetPage => NOT_ON_FIRST_PAGE.check(&(), state),
        Action::UpdateCurrentPage(page) => {
            IS_VALID_PAGE.check(page, state)?;
            IS_ON_DIFFERENT_PAGE.check(page, state)
        }
        Action::UpdatePageSize(size) => {
            IS_VALID_PAGE_SIZE.check(size, state)?;
            IS_DIFFERENT_PAGE_SIZE.check(size, state)
        }
        Action::SelectCollection(collection) => {
            IS_STRING.check(collection, state)?;
            IS_KNOWN_COLLECTION.check(collection, state)?;
            IS_COLLECTION_DESELECTED.check(collection, state)
        }
        Action::SelectSort(index) => IS_SORT_DESELECTED.check(index, state),
        Action::UpdateAutocompleteQuery(query) => {
            IS_DIFFERENT_AUTOCOMPLETE_QUERY.check(query, state)
        }
        Action::FetchMoreRefinements(field) => {
            IS_STRING.check(field, state)?;
            HAS_MORE_REFINEMENTS.check(field, state)
        }
        Action::FetchMoreProducts(amount) => IS_VALID_PRODUCT_AMOUNT.check(amount, state),
        Action::FetchProductDetails(id) => IS_STRING.check(id, state),
        Action::FetchCollectionCount(collection) => IS_STRING.check(collection, state),
        Action::FetchAutocompleteSuggestions(query) => IS_STRING.check(query, state),
        Action::CreateComponentState { tag, .. } | Action::RemoveComponentState { tag, .. } => {
            IS_STRING.check(tag, state)
        }
        _ => Ok(()),
    }
}

/// Run every validator bound to the action's type
pub fn validate(action: &Action, state: &StoreState) -> Result<(), ValidationError> {
    run_checks(action, state).map_err(|message| ValidationError {
        action: action.action_type(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionType;
    use crate::state::Navigation;
    use pretty_assertions::assert_eq;

    fn state_with_brand() -> StoreState {
        let mut state = StoreState::default();
        state.data.navigations.insert(
            "brand".to_string(),
            Navigation {
                refinements: vec![Refinement::value("Nike"), Refinement::value("Vans")],
                selected: vec![0],
                more: true,
                ..Navigation::new("brand")
            },
        );
        state
    }

    fn add(navigation_id: &str, refinement: Refinement) -> Action {
        Action::AddRefinement(RefinementTarget {
            navigation_id: navigation_id.to_string(),
            refinement,
        })
    }

    #[test]
    fn test_is_string() {
        let state = StoreState::default();
        assert!(IS_STRING.check("shoes", &state).is_ok());
        assert_eq!(IS_STRING.check("   ", &state), Err("must be a non-empty string"));
    }

    #[test]
    fn test_query_validation() {
        let state = StoreState::default();
        assert!(validate(&Action::UpdateQuery(None), &state).is_ok());
        assert!(validate(&Action::UpdateQuery(Some("shoes".into())), &state).is_ok());
        assert_eq!(
            validate(&Action::UpdateQuery(Some(String::new())), &state),
            Err(ValidationError {
                action: ActionType::UpdateQuery,
                message: "query must be non-empty or null",
            })
        );
    }

    #[test]
    fn test_range_validation() {
        let state = StoreState::default();
        assert!(validate(&add("price", Refinement::range(1.0, 2.0)), &state).is_ok());
        assert!(validate(&add("price", Refinement::range(2.0, 2.0)), &state).is_err());
        assert!(validate(&add("price", Refinement::range(3.0, 2.0)), &state).is_err());
        assert!(validate(&add("price", Refinement::range(f64::NAN, 2.0)), &state).is_err());
    }

    #[test]
    fn test_add_refinement_rejects_selected_duplicate() {
        let state = state_with_brand();
        assert!(validate(&add("brand", Refinement::value("Nike")), &state).is_err());
        // present but unselected is fine, the reducer reselects it
        assert!(validate(&add("brand", Refinement::value("Vans")), &state).is_ok());
        assert!(validate(&add("brand", Refinement::value("")), &state).is_err());
        assert!(validate(&add(" ", Refinement::value("Nike")), &state).is_err());
    }

    #[test]
    fn test_selection_by_index() {
        let state = state_with_brand();
        let target = |index| IndexTarget {
            navigation_id: "brand".to_string(),
            index,
        };

        assert!(validate(&Action::SelectRefinement(target(1)), &state).is_ok());
        assert!(validate(&Action::SelectRefinement(target(0)), &state).is_err());
        assert!(validate(&Action::SelectRefinement(target(7)), &state).is_err());
        assert!(validate(&Action::DeselectRefinement(target(0)), &state).is_ok());
        assert!(validate(&Action::DeselectRefinement(target(1)), &state).is_err());
    }

    #[test]
    fn test_reset_refinements() {
        let state = state_with_brand();
        assert!(validate(&Action::ResetRefinements(ResetTarget::All), &StoreState::default()).is_ok());
        assert!(validate(&Action::ResetRefinements(ResetTarget::Field("brand".into())), &state).is_ok());
        assert!(validate(&Action::ResetRefinements(ResetTarget::Field("color".into())), &state).is_err());
    }

    #[test]
    fn test_paging() {
        let mut state = StoreState::default();
        assert!(validate(&Action::ResetPage, &state).is_err());

        state.data.page.last = 5;
        state.data.page.current = 2;
        assert!(validate(&Action::ResetPage, &state).is_ok());
        assert!(validate(&Action::UpdateCurrentPage(5), &state).is_ok());
        assert!(validate(&Action::UpdateCurrentPage(2), &state).is_err());
        assert!(validate(&Action::UpdateCurrentPage(6), &state).is_err());
        assert!(validate(&Action::UpdateCurrentPage(0), &state).is_err());

        assert!(validate(&Action::UpdatePageSize(10), &state).is_err());
        assert!(validate(&Action::UpdatePageSize(25), &state).is_ok());
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let state = StoreState::default();
        assert_eq!(
            validate(&Action::UpdatePageSize(7), &state),
            Err(ValidationError {
                action: ActionType::UpdatePageSize,
                message: "page size must be one of the options",
            })
        );
        assert!(validate(&Action::UpdatePageSize(0), &state).is_err());
    }

    #[test]
    fn test_refinement_kind_must_match_navigation() {
        let mut state = state_with_brand();
        state.data.navigations.insert(
            "price".to_string(),
            Navigation {
                range: true,
                refinements: vec![Refinement::range(1.0, 5.0)],
                selected: vec![0],
                ..Navigation::new("price")
            },
        );

        assert_eq!(
            validate(&add("price", Refinement::value("cheap")), &state),
            Err(ValidationError {
                action: ActionType::AddRefinement,
                message: "refinement kind must match the navigation",
            })
        );
        assert!(validate(&add("brand", Refinement::range(1.0, 2.0)), &state).is_err());

        assert!(validate(&add("price", Refinement::range(5.0, 10.0)), &state).is_ok());
        assert!(validate(&add("brand", Refinement::value("Puma")), &state).is_ok());
        // unknown navigations take the kind of their first refinement
        assert!(validate(&add("color", Refinement::value("red")), &state).is_ok());
        assert!(validate(&add("width", Refinement::range(1.0, 2.0)), &state).is_ok());
    }

    #[test]
    fn test_collection_sort_and_autocomplete() {
        let state = StoreState::default();
        assert!(validate(&Action::SelectCollection("default".into()), &state).is_err());
        assert!(validate(&Action::SelectCollection("sale".into()), &state).is_err());

        let mut config = storefront_config::Configuration::default();
        config.collections.options = vec!["sale".to_string()];
        let mut state = StoreState::from_config(config);
        assert!(validate(&Action::SelectCollection("sale".into()), &state).is_ok());
        assert_eq!(
            validate(&Action::SelectCollection("nope".into()), &state),
            Err(ValidationError {
                action: ActionType::SelectCollection,
                message: "collection must be one of the configured collections",
            })
        );

        assert!(validate(&Action::SelectSort(0), &state).is_err());

        state.data.autocomplete.query = "re".to_string();
        assert!(validate(&Action::UpdateAutocompleteQuery("re".into()), &state).is_err());
        assert!(validate(&Action::UpdateAutocompleteQuery("red".into()), &state).is_ok());
    }

    #[test]
    fn test_fetch_intents() {
        let state = state_with_brand();
        assert!(validate(&Action::FetchMoreRefinements("brand".into()), &state).is_ok());
        assert!(validate(&Action::FetchMoreRefinements("color".into()), &state).is_err());
        assert!(validate(&Action::FetchMoreProducts(0), &state).is_err());
        assert!(validate(&Action::FetchMoreProducts(20), &state).is_ok());
        assert!(validate(&Action::FetchProducts, &state).is_ok());
    }
}
