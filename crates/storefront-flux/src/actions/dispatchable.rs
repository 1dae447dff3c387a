use super::Action;
use crate::state::StoreState;
use std::fmt;

/// Decision deferred until the latest state is known
pub type Thunk = Box<dyn FnOnce(&StoreState) -> Dispatchable + Send>;

/// Anything that can be handed to the store
///
/// A batch is one logical unit: its members share correlation ids and are
/// applied in order. A deferred value is evaluated exactly once, against the
/// state current at the time it is dequeued.
pub enum Dispatchable {
    Action(Action),
    Batch(Vec<Action>),
    Deferred(Thunk),
}

impl Dispatchable {
    pub fn deferred(thunk: impl FnOnce(&StoreState) -> Dispatchable + Send + 'static) -> Self {
        Dispatchable::Deferred(Box::new(thunk))
    }

    /// Flatten into the ordered actions to apply
    pub fn resolve(self, state: &StoreState) -> Vec<Action> {
        match self {
            Dispatchable::Action(action) => vec![action],
            Dispatchable::Batch(actions) => actions,
            Dispatchable::Deferred(thunk) => thunk(state).resolve(state),
        }
    }
}

impl From<Action> for Dispatchable {
    fn from(action: Action) -> Self {
        Dispatchable::Action(action)
    }
}

impl From<Vec<Action>> for Dispatchable {
    fn from(actions: Vec<Action>) -> Self {
        Dispatchable::Batch(actions)
    }
}

impl fmt::Debug for Dispatchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatchable::Batch(actions) => f.debug_tuple("Batch").field(actions).finish(),
            Dispatchable::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deferred_sees_state() {
        let mut state = StoreState::default();
        state.data.page.current = 3;

        let dispatchable = Dispatchable::deferred(|state| {
            if state.data.page.current > 1 {
                vec![Action::ResetPage, Action::FetchProducts].into()
            } else {
                Action::FetchProducts.into()
            }
        });

        assert_eq!(
            dispatchable.resolve(&state),
            vec![Action::ResetPage, Action::FetchProducts]
        );
    }
}
