use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter};

/// A product record; the metadata is passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub data: Map<String, Value>,
}

impl Product {
    pub fn id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }
}

/// Product shown in the details view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub product: Option<Product>,
}

/// Merchandising template of the last response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub rule_name: Option<String>,
    pub zones: Map<String, Value>,
}

/// Logical request kinds tracked by the in-flight flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
pub enum RequestKind {
    Search,
    MoreProducts,
    MoreRefinements,
    AutocompleteSuggestions,
    AutocompleteProducts,
    Details,
}

/// One in-flight flag per request kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsFetching {
    pub search: bool,
    pub more_products: bool,
    pub more_refinements: bool,
    pub autocomplete_suggestions: bool,
    pub autocomplete_products: bool,
    pub details: bool,
}

impl IsFetching {
    pub fn get(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Search => self.search,
            RequestKind::MoreProducts => self.more_products,
            RequestKind::MoreRefinements => self.more_refinements,
            RequestKind::AutocompleteSuggestions => self.autocomplete_suggestions,
            RequestKind::AutocompleteProducts => self.autocomplete_products,
            RequestKind::Details => self.details,
        }
    }

    pub fn set(&mut self, kind: RequestKind, fetching: bool) {
        let flag = match kind {
            RequestKind::Search => &mut self.search,
            RequestKind::MoreProducts => &mut self.more_products,
            RequestKind::MoreRefinements => &mut self.more_refinements,
            RequestKind::AutocompleteSuggestions => &mut self.autocomplete_suggestions,
            RequestKind::AutocompleteProducts => &mut self.autocomplete_products,
            RequestKind::Details => &mut self.details,
        };
        *flag = fetching;
    }
}
