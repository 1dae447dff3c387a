//! Navigation adapters
//!
//! Merge the bridge's available and selected navigation lists into store
//! navigations, drop refinements that cannot narrow the result, and apply the
//! configured ordering.

use super::refinements::{extract_refinement, refinements_match};
use crate::state::{Navigation, NavigationSort, Refinement, SortField};
use std::cmp::Ordering;
use storefront_client::BackendNavigation;

/// Parse a bridge sort hint such as `Count_Descending`
pub fn extract_navigation_sort(sort: Option<&str>) -> Option<NavigationSort> {
    let (field, order) = sort?.split_once('_')?;
    let field = match field {
        "Value" => SortField::Value,
        "Count" => SortField::Count,
        _ => return None,
    };
    let descending = match order {
        "Descending" => true,
        "Ascending" => false,
        _ => return None,
    };
    Some(NavigationSort { field, descending })
}

/// Convert one backend navigation; nothing is selected yet
pub fn extract_navigation(navigation: &BackendNavigation) -> Navigation {
    Navigation {
        field: navigation.name.clone(),
        label: navigation
            .display_name
            .clone()
            .unwrap_or_else(|| navigation.name.clone()),
        range: navigation.range,
        or: navigation.or,
        more: navigation.more_refinements,
        refinements: navigation.refinements.iter().map(extract_refinement).collect(),
        selected: Vec::new(),
        sort: extract_navigation_sort(navigation.sort.as_deref()),
    }
}

/// Merge available and selected navigations
///
/// Available navigations keep their order. A selected refinement found among
/// the available ones marks that index as selected, otherwise it is appended
/// and selected. Selected navigations with no available counterpart are
/// appended with every refinement selected.
pub fn combine_navigations(
    available: &[BackendNavigation],
    selected: &[BackendNavigation],
) -> Vec<Navigation> {
    let mut navigations: Vec<Navigation> = available.iter().map(extract_navigation).collect();

    for selected_navigation in selected {
        let existing = navigations
            .iter_mut()
            .find(|navigation| navigation.field == selected_navigation.name);

        match existing {
            Some(navigation) => {
                let kind = navigation.kind();
                for refinement in selected_navigation.refinements.iter().map(extract_refinement) {
                    let index = match navigation
                        .refinements
                        .iter()
                        .position(|candidate| refinements_match(candidate, &refinement, kind))
                    {
                        Some(index) => index,
                        None => {
                            navigation.refinements.push(refinement);
                            navigation.refinements.len() - 1
                        }
                    };
                    if !navigation.selected.contains(&index) {
                        navigation.selected.push(index);
                    }
                }
            }
            None => {
                let mut navigation = extract_navigation(selected_navigation);
                navigation.selected = (0..navigation.refinements.len()).collect();
                navigations.push(navigation);
            }
        }
    }

    navigations
}

/// Drop refinements that provide no signal
///
/// In an AND navigation an unselected refinement matching every record cannot
/// narrow the result. Navigations left without refinements are dropped.
pub fn prune_refinements(navigations: Vec<Navigation>, record_count: u64) -> Vec<Navigation> {
    navigations
        .into_iter()
        .filter_map(|mut navigation| {
            if !navigation.or && record_count > 0 {
                let keep: Vec<usize> = (0..navigation.refinements.len())
                    .filter(|&index| {
                        navigation.is_selected(index)
                            || navigation.refinements[index].total() != Some(record_count)
                    })
                    .collect();
                if keep.len() != navigation.refinements.len() {
                    navigation.reindex(&keep);
                }
            }
            if navigation.refinements.is_empty() {
                log::debug!("Pruned navigation '{}'", navigation.field);
                None
            } else {
                Some(navigation)
            }
        })
        .collect()
}

/// Pinned fields first, in pinned order; the rest keep their order
pub fn sort_navigations(navigations: Vec<Navigation>, pinned: &[String]) -> Vec<Navigation> {
    let (mut front, rest): (Vec<_>, Vec<_>) = navigations
        .into_iter()
        .partition(|navigation| pinned.contains(&navigation.field));
    front.sort_by_key(|navigation| pinned.iter().position(|field| *field == navigation.field));
    front.extend(rest);
    front
}

fn compare_refinements(lhs: &Refinement, rhs: &Refinement, field: SortField) -> Ordering {
    match field {
        SortField::Count => lhs.total().cmp(&rhs.total()),
        SortField::Value => match (lhs, rhs) {
            (Refinement::Value { value: left, .. }, Refinement::Value { value: right, .. }) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            (Refinement::Range { low: left, .. }, Refinement::Range { low: right, .. }) => {
                left.total_cmp(right)
            }
            _ => Ordering::Equal,
        },
    }
}

/// Order a navigation's refinements
///
/// When `use_sort` is set the navigation's own sort descriptor applies first.
/// Values listed in `pinned` then move to the front in that order. Selected
/// indices follow their refinements.
pub fn sort_refinements(mut navigation: Navigation, pinned: &[String], use_sort: bool) -> Navigation {
    let mut order: Vec<usize> = (0..navigation.refinements.len()).collect();

    if let (true, Some(sort)) = (use_sort, navigation.sort) {
        order.sort_by(|&a, &b| {
            let ordering =
                compare_refinements(&navigation.refinements[a], &navigation.refinements[b], sort.field);
            if sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    if !pinned.is_empty() {
        let pin_rank = |index: &usize| {
            navigation.refinements[*index]
                .as_value()
                .and_then(|value| pinned.iter().position(|pin| pin == value))
                .unwrap_or(pinned.len())
        };
        order.sort_by_key(pin_rank);
    }

    if order.iter().enumerate().any(|(position, &index)| position != index) {
        navigation.reindex(&order);
    }
    navigation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use storefront_client::BackendRefinement;

    fn value(value: &str, count: u64) -> BackendRefinement {
        BackendRefinement::Value {
            value: value.to_string(),
            count,
        }
    }

    fn backend(name: &str, refinements: Vec<BackendRefinement>) -> BackendNavigation {
        BackendNavigation {
            name: name.to_string(),
            refinements,
            ..BackendNavigation::default()
        }
    }

    #[test]
    fn test_extract_navigation_sort() {
        assert_eq!(
            extract_navigation_sort(Some("Count_Descending")),
            Some(NavigationSort {
                field: SortField::Count,
                descending: true
            })
        );
        assert_eq!(
            extract_navigation_sort(Some("Value_Ascending")),
            Some(NavigationSort {
                field: SortField::Value,
                descending: false
            })
        );
        assert_eq!(extract_navigation_sort(Some("Relevance")), None);
        assert_eq!(extract_navigation_sort(None), None);
    }

    #[test]
    fn test_combine_marks_selected() {
        let available = vec![backend("brand", vec![value("Nike", 5), value("Adidas", 3)])];
        let selected = vec![
            backend("brand", vec![value("Adidas", 3), value("Puma", 1)]),
            backend("color", vec![value("red", 2)]),
        ];

        let navigations = combine_navigations(&available, &selected);

        assert_eq!(navigations.len(), 2);
        let brand = &navigations[0];
        assert_eq!(brand.field, "brand");
        assert_eq!(brand.refinements.len(), 3);
        assert_eq!(brand.selected, vec![1, 2]);
        assert_eq!(brand.refinements[2].as_value(), Some("Puma"));

        let color = &navigations[1];
        assert_eq!(color.field, "color");
        assert_eq!(color.selected, vec![0]);
    }

    #[test]
    fn test_prune_drops_uninformative_refinements() {
        let available = vec![
            backend("brand", vec![value("Nike", 10), value("Adidas", 4)]),
            backend("in_stock", vec![value("yes", 10)]),
        ];
        let navigations = combine_navigations(&available, &[]);

        let pruned = prune_refinements(navigations, 10);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].field, "brand");
        assert_eq!(pruned[0].refinements, vec![Refinement::value("Adidas").with_total(4)]);
    }

    #[test]
    fn test_prune_keeps_selected_and_or_navigations() {
        let available = vec![backend("brand", vec![value("Nike", 10)])];
        let selected = vec![backend("brand", vec![value("Nike", 10)])];
        let mut navigations = combine_navigations(&available, &selected);
        let mut color = extract_navigation(&backend("color", vec![value("red", 10)]));
        color.or = true;
        navigations.push(color);

        let pruned = prune_refinements(navigations, 10);

        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned[0].selected, vec![0]);
    }

    #[test]
    fn test_sort_navigations_pins_first() {
        let navigations = vec![
            Navigation::new("brand"),
            Navigation::new("color"),
            Navigation::new("price"),
        ];
        let pinned = vec!["price".to_string(), "color".to_string()];

        let sorted = sort_navigations(navigations, &pinned);
        let fields: Vec<_> = sorted.iter().map(|n| n.field.as_str()).collect();
        assert_eq!(fields, vec!["price", "color", "brand"]);
    }

    #[test]
    fn test_sort_refinements_by_count_then_pins() {
        let mut navigation = extract_navigation(&backend(
            "brand",
            vec![value("Adidas", 3), value("Nike", 9), value("Puma", 5)],
        ));
        navigation.sort = Some(NavigationSort {
            field: SortField::Count,
            descending: true,
        });
        navigation.selected = vec![0];

        let sorted = sort_refinements(navigation.clone(), &[], true);
        let values: Vec<_> = sorted.refinements.iter().filter_map(|r| r.as_value()).collect();
        assert_eq!(values, vec!["Nike", "Puma", "Adidas"]);
        assert_eq!(sorted.selected, vec![2]);

        let pinned = sort_refinements(navigation, &["Puma".to_string()], true);
        let values: Vec<_> = pinned.refinements.iter().filter_map(|r| r.as_value()).collect();
        assert_eq!(values, vec!["Puma", "Nike", "Adidas"]);
        assert_eq!(pinned.selected, vec![2]);
    }

    #[test]
    fn test_sort_refinements_without_sort_flag_keeps_order() {
        let mut navigation = extract_navigation(&backend(
            "brand",
            vec![value("b", 1), value("a", 2)],
        ));
        navigation.sort = Some(NavigationSort {
            field: SortField::Value,
            descending: false,
        });

        let sorted = sort_refinements(navigation.clone(), &[], false);
        assert_eq!(sorted, navigation);
    }
}
