use crate::actions::AutocompleteSuggestions;
use crate::state::AutocompleteNavigation;
use serde_json::Value;
use storefront_client::AutocompleteResponse;

/// Suggestions, navigation values and the first suggestion's categories
pub fn extract_autocomplete(
    response: &AutocompleteResponse,
    category_field: Option<&str>,
) -> AutocompleteSuggestions {
    let result = &response.result;

    let categories = match (category_field, result.search_terms.first()) {
        (Some(field), Some(term)) => match term.additional_info.get(field) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(value)) => vec![value.clone()],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    AutocompleteSuggestions {
        suggestions: result
            .search_terms
            .iter()
            .map(|term| term.value.clone())
            .collect(),
        categories,
        navigations: result
            .navigations
            .iter()
            .map(|navigation| AutocompleteNavigation {
                field: navigation.name.clone(),
                refinements: navigation.values.clone(),
            })
            .collect(),
    }
}
