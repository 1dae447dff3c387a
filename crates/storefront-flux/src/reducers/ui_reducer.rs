use crate::actions::Action;
use crate::state::UiState;

pub fn reduce(mut state: UiState, action: &Action) -> UiState {
    match action {
        Action::CreateComponentState {
            tag,
            id,
            state: component,
        } => {
            state
                .entry(tag.clone())
                .or_default()
                .insert(id.clone(), component.clone());
        }
        Action::RemoveComponentState { tag, id } => {
            if let Some(components) = state.get_mut(tag) {
                components.remove(id);
                if components.is_empty() {
                    state.remove(tag);
                }
            }
        }
        _ => {}
    }
    state
}
