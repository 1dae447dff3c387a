use crate::actions::Action;
use crate::state::Autocomplete;

pub fn reduce(mut state: Autocomplete, action: &Action) -> Autocomplete {
    match action {
        Action::UpdateAutocompleteQuery(query) => {
            state.query = query.clone();
        }
        Action::ReceiveAutocompleteSuggestions(Ok(received)) => {
            state.suggestions = received.suggestions.clone();
            state.navigations = received.navigations.clone();
            state.category.values = received.categories.clone();
        }
        Action::ReceiveAutocompleteProducts(Ok(products)) => {
            state.products = products.clone();
        }
        _ => {}
    }
    state
}
