//! Navigations Reducer
//!
//! Maintains the indexed navigations and their per-refinement selection.

use crate::actions::{Action, IndexTarget, RefinementTarget, ResetTarget};
use crate::adapters::refinements_match;
use crate::state::{Indexed, Navigation, RefinementKind};

pub fn reduce(mut state: Indexed<Navigation>, action: &Action) -> Indexed<Navigation> {
    match action {
        Action::ReceiveNavigations(navigations) => {
            state = Indexed::from_entries(
                navigations
                    .iter()
                    .map(|navigation| (navigation.field.clone(), navigation.clone())),
            );
        }
        Action::AddRefinement(target) => add_refinement(&mut state, target),
        Action::SelectRefinement(IndexTarget {
            navigation_id,
            index,
        }) => match state.get_mut(navigation_id) {
            // never selects twice and never points past the refinements
            Some(navigation)
                if *index < navigation.refinements.len() && !navigation.is_selected(*index) =>
            {
                navigation.selected.push(*index);
            }
            Some(_) => log::debug!("Ignoring selection of {}[{}]", navigation_id, index),
            None => log::warn!("Cannot select refinement of unknown navigation '{}'", navigation_id),
        },
        Action::DeselectRefinement(IndexTarget {
            navigation_id,
            index,
        }) => {
            if let Some(navigation) = state.get_mut(navigation_id) {
                navigation.selected.retain(|selected| selected != index);
            }
        }
        Action::ResetRefinements(ResetTarget::All) => {
            for navigation in state.values_mut() {
                navigation.selected.clear();
            }
        }
        Action::ResetRefinements(ResetTarget::Field(field)) => {
            if let Some(navigation) = state.get_mut(field) {
                navigation.selected.clear();
            }
        }
        Action::ReceiveMoreRefinements(Ok(more)) => match state.get_mut(&more.navigation_id) {
            Some(navigation) => {
                navigation.refinements = more.refinements.clone();
                navigation.selected = more
                    .selected
                    .iter()
                    .copied()
                    .filter(|&index| index < more.refinements.len())
                    .collect();
                navigation.more = false;
            }
            None => log::warn!(
                "Received refinements for unknown navigation '{}'",
                more.navigation_id
            ),
        },
        _ => {}
    }
    state
}

/// Select the matching refinement, appending it first when it is new
fn add_refinement(state: &mut Indexed<Navigation>, target: &RefinementTarget) {
    let RefinementTarget {
        navigation_id,
        refinement,
    } = target;

    match state.get_mut(navigation_id) {
        Some(navigation) => {
            let kind = navigation.kind();
            let index = match navigation
                .refinements
                .iter()
                .position(|existing| refinements_match(existing, refinement, kind))
            {
                Some(index) => index,
                None => {
                    navigation.refinements.push(refinement.clone());
                    navigation.refinements.len() - 1
                }
            };
            if !navigation.is_selected(index) {
                navigation.selected.push(index);
            }
        }
        None => {
            log::debug!("Creating navigation '{}' from added refinement", navigation_id);
            let navigation = Navigation {
                range: refinement.kind() == RefinementKind::Range,
                refinements: vec![refinement.clone()],
                selected: vec![0],
                ..Navigation::new(navigation_id.clone())
            };
            state.insert(navigation_id.clone(), navigation);
        }
    }
}
