//! Refinement matching and conversion

use crate::state::{Navigation, Refinement, RefinementKind};
use storefront_client::{BackendRefinement, SelectedRefinement};

/// Type-aware refinement equality
///
/// Value refinements match on the exact value, range refinements on exact
/// bounds. A refinement of the other kind never matches.
pub fn refinements_match(lhs: &Refinement, rhs: &Refinement, kind: RefinementKind) -> bool {
    match (kind, lhs, rhs) {
        (
            RefinementKind::Value,
            Refinement::Value { value: left, .. },
            Refinement::Value { value: right, .. },
        ) => left == right,
        (
            RefinementKind::Range,
            Refinement::Range {
                low: left_low,
                high: left_high,
                ..
            },
            Refinement::Range {
                low: right_low,
                high: right_high,
                ..
            },
        ) => left_low == right_low && left_high == right_high,
        _ => false,
    }
}

pub fn extract_refinement(refinement: &BackendRefinement) -> Refinement {
    match refinement {
        BackendRefinement::Value { value, count } => Refinement::value(value.clone()).with_total(*count),
        BackendRefinement::Range { low, high, count } => {
            Refinement::range(*low, *high).with_total(*count)
        }
    }
}

/// Backend payload for one selected refinement of `navigation`
///
/// `None` when the refinement does not have the navigation's kind.
pub fn to_selected_refinement(
    navigation: &Navigation,
    refinement: &Refinement,
) -> Option<SelectedRefinement> {
    match (navigation.kind(), refinement) {
        (RefinementKind::Value, Refinement::Value { value, .. }) => Some(SelectedRefinement::Value {
            navigation_name: navigation.field.clone(),
            value: value.clone(),
            exclude: false,
        }),
        (RefinementKind::Range, Refinement::Range { low, high, .. }) => {
            Some(SelectedRefinement::Range {
                navigation_name: navigation.field.clone(),
                low: *low,
                high: *high,
                exclude: false,
            })
        }
        _ => {
            log::warn!(
                "Refinement {:?} does not fit navigation '{}'",
                refinement,
                navigation.field
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_is_reflexive() {
        let value = Refinement::value("Nike");
        let range = Refinement::range(10.0, 20.0);
        assert!(refinements_match(&value, &value, RefinementKind::Value));
        assert!(refinements_match(&range, &range, RefinementKind::Range));
    }

    #[test]
    fn test_match_ignores_totals() {
        let left = Refinement::value("Nike").with_total(4);
        let right = Refinement::value("Nike");
        assert!(refinements_match(&left, &right, RefinementKind::Value));
    }

    #[test]
    fn test_mismatches() {
        let nike = Refinement::value("Nike");
        let adidas = Refinement::value("Adidas");
        let range = Refinement::range(10.0, 20.0);
        let other_range = Refinement::range(10.0, 25.0);

        assert!(!refinements_match(&nike, &adidas, RefinementKind::Value));
        assert!(!refinements_match(&range, &other_range, RefinementKind::Range));
        assert!(!refinements_match(&nike, &range, RefinementKind::Value));
        assert!(!refinements_match(&range, &range, RefinementKind::Value));
        assert!(!refinements_match(&nike, &nike, RefinementKind::Range));
    }

    #[test]
    fn test_to_selected_refinement_follows_navigation_kind() {
        let mut price = Navigation::new("price");
        price.range = true;

        assert_eq!(
            to_selected_refinement(&price, &Refinement::range(1.0, 2.0)),
            Some(SelectedRefinement::Range {
                navigation_name: "price".to_string(),
                low: 1.0,
                high: 2.0,
                exclude: false,
            })
        );
        assert_eq!(to_selected_refinement(&price, &Refinement::value("cheap")), None);
    }
}
