//! Search backend data transfer objects
//!
//! These types mirror the JSON exchanged with the search bridge and the
//! autocomplete service. They are intentionally separate from the store's
//! normalized entities; the adapters in `storefront-flux` convert between
//! the two.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction understood by the backend
///
/// Ascending is the backend default and is expressed by leaving the order
/// out entirely, so only `Descending` is ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A single sort criterion in a search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSort {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

/// A refinement applied to a search request ("refinement match" payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum SelectedRefinement {
    Value {
        navigation_name: String,
        value: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        exclude: bool,
    },
    Range {
        navigation_name: String,
        low: f64,
        high: f64,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        exclude: bool,
    },
}

impl SelectedRefinement {
    /// Name of the navigation this refinement narrows
    pub fn navigation_name(&self) -> &str {
        match self {
            SelectedRefinement::Value {
                navigation_name, ..
            }
            | SelectedRefinement::Range {
                navigation_name, ..
            } => navigation_name,
        }
    }
}

/// Free-form URL parameter forwarded to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomUrlParam {
    pub key: String,
    pub value: String,
}

/// Search request sent to the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub area: String,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default)]
    pub refinements: Vec<SelectedRefinement>,
    pub skip: u64,
    pub page_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<BackendSort>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub prune_refinements: bool,
    #[serde(default)]
    pub disable_autocorrection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_strategy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_url_params: Vec<CustomUrlParam>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            area: "Production".to_string(),
            collection: "default".to_string(),
            language: None,
            query: None,
            refinements: Vec::new(),
            skip: 0,
            page_size: 10,
            sort: None,
            fields: vec!["*".to_string()],
            prune_refinements: true,
            disable_autocorrection: false,
            match_strategy_name: None,
            custom_url_params: Vec::new(),
        }
    }
}

/// Field-wise patch over a [`SearchRequest`]
///
/// Every field left as `None` keeps the value of the request it is applied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequestPatch {
    pub area: Option<String>,
    pub collection: Option<String>,
    pub language: Option<String>,
    pub query: Option<String>,
    pub refinements: Option<Vec<SelectedRefinement>>,
    pub skip: Option<u64>,
    pub page_size: Option<u64>,
    pub sort: Option<BackendSort>,
    pub fields: Option<Vec<String>>,
    pub prune_refinements: Option<bool>,
    pub disable_autocorrection: Option<bool>,
    pub match_strategy_name: Option<String>,
    pub custom_url_params: Option<Vec<CustomUrlParam>>,
}

/// Request sent to the autocomplete (SAYT) service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub query: String,
    pub collection: String,
    pub area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub num_search_terms: u32,
    pub num_navigations: u32,
    #[serde(default)]
    pub sort_alphabetically: bool,
    #[serde(default)]
    pub fuzzy_matching: bool,
}

/// Field-wise patch over an [`AutocompleteRequest`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompletePatch {
    pub collection: Option<String>,
    pub area: Option<String>,
    pub language: Option<String>,
    pub num_search_terms: Option<u32>,
    pub num_navigations: Option<u32>,
    pub sort_alphabetically: Option<bool>,
    pub fuzzy_matching: Option<bool>,
}

/// A single product record as returned by the bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    pub id: Option<String>,
    pub collection: Option<String>,
    pub all_meta: Map<String, Value>,
}

/// Refinement inside a backend navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum BackendRefinement {
    Value {
        value: String,
        #[serde(default)]
        count: u64,
    },
    Range {
        low: f64,
        high: f64,
        #[serde(default)]
        count: u64,
    },
}

/// A navigation (facet) as returned by the bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendNavigation {
    pub name: String,
    pub display_name: Option<String>,
    pub range: bool,
    pub or: bool,
    pub more_refinements: bool,
    pub refinements: Vec<BackendRefinement>,
    /// Sort hint such as `Count_Descending` or `Value_Ascending`
    pub sort: Option<String>,
}

/// Merchandising template attached to a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackendTemplate {
    pub name: String,
    pub rule_name: Option<String>,
    pub zones: Map<String, Value>,
}

/// Record window reported by the bridge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub record_start: u64,
    pub record_end: u64,
}

/// Search response from the bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    pub id: Option<String>,
    pub area: Option<String>,
    pub original_query: Option<String>,
    pub corrected_query: Option<String>,
    pub did_you_mean: Vec<String>,
    pub related_queries: Vec<String>,
    pub rewrites: Vec<String>,
    pub records: Vec<Record>,
    pub total_record_count: u64,
    pub available_navigation: Vec<BackendNavigation>,
    pub selected_navigation: Vec<BackendNavigation>,
    pub template: BackendTemplate,
    pub redirect: Option<String>,
    pub page_info: PageInfo,
    pub warnings: Vec<String>,
}

/// Response of a "more refinements" call for one navigation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementsResponse {
    pub navigation: BackendNavigation,
}

/// One suggested search term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchTerm {
    pub value: String,
    pub additional_info: Map<String, Value>,
}

/// Navigation values suggested by autocomplete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteNavigationDto {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutocompleteResult {
    pub search_terms: Vec<SearchTerm>,
    pub navigations: Vec<AutocompleteNavigationDto>,
}

/// Autocomplete response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteResponse {
    pub result: AutocompleteResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ascending_sort_omits_order() {
        let sort = BackendSort {
            field: "price".to_string(),
            order: None,
        };
        assert_eq!(serde_json::to_string(&sort).unwrap(), r#"{"field":"price"}"#);
    }

    #[test]
    fn test_selected_refinement_wire_shape() {
        let refinement = SelectedRefinement::Range {
            navigation_name: "price".to_string(),
            low: 10.0,
            high: 20.0,
            exclude: false,
        };
        let json = serde_json::to_value(&refinement).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Range",
                "navigationName": "price",
                "low": 10.0,
                "high": 20.0
            })
        );
    }

    #[test]
    fn test_search_response_parses_partial_payload() {
        let json = r#"{
            "originalQuery": "shoes",
            "totalRecordCount": 41,
            "records": [{ "allMeta": { "id": "1", "title": "Red shoe" } }],
            "availableNavigation": [{
                "name": "brand",
                "displayName": "Brand",
                "refinements": [{ "type": "Value", "value": "Nike", "count": 3 }]
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.original_query.as_deref(), Some("shoes"));
        assert_eq!(response.total_record_count, 41);
        assert_eq!(response.records.len(), 1);
        assert_eq!(
            response.available_navigation[0].refinements[0],
            BackendRefinement::Value {
                value: "Nike".to_string(),
                count: 3
            }
        );
        assert!(response.selected_navigation.is_empty());
    }

    #[test]
    fn test_search_request_serializes_camel_case() {
        let request = SearchRequest {
            query: Some("boots".to_string()),
            page_size: 24,
            ..SearchRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["pageSize"], 24);
        assert_eq!(json["query"], "boots");
        assert!(json.get("sort").is_none());
    }
}
