use crate::actions::Action;
use crate::state::Sorts;

pub fn reduce(mut state: Sorts, action: &Action) -> Sorts {
    if let Action::SelectSort(index) = action {
        if *index < state.items.len() {
            state.selected = *index;
        } else {
            log::warn!("Ignoring unknown sort index {}", index);
        }
    }
    state
}
