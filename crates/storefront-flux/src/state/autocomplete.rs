use super::Product;
use serde::{Deserialize, Serialize};

/// Values of one navigation suggested while typing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteNavigation {
    pub field: String,
    pub refinements: Vec<String>,
}

/// Category values offered for the first suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub field: Option<String>,
    pub values: Vec<String>,
}

/// Search-as-you-type state, independent from the main search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Autocomplete {
    pub query: String,
    pub suggestions: Vec<String>,
    pub navigations: Vec<AutocompleteNavigation>,
    pub products: Vec<Product>,
    pub category: Category,
}
