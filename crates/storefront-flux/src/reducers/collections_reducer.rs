use crate::actions::Action;
use crate::state::Collections;

pub fn reduce(mut state: Collections, action: &Action) -> Collections {
    match action {
        Action::SelectCollection(name) => {
            if state.items.contains(name) {
                state.selected = name.clone();
            } else {
                log::warn!("Cannot select unknown collection '{}'", name);
            }
        }
        Action::ReceiveCollectionCount(Ok(count)) => match state.items.get_mut(&count.collection) {
            Some(collection) => collection.total = Some(count.count),
            None => log::warn!("Received count for unknown collection '{}'", count.collection),
        },
        _ => {}
    }
    state
}
