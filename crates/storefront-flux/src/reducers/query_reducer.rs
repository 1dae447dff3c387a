use crate::actions::Action;
use crate::state::Query;

pub fn reduce(mut state: Query, action: &Action) -> Query {
    match action {
        Action::UpdateQuery(query) => {
            state.original = query.clone();
        }
        Action::ReceiveQuery(query) => {
            state = query.clone();
        }
        _ => {}
    }
    state
}
