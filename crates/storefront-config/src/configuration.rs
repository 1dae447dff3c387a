//! Storefront configuration
//!
//! Configuration loaded from .storefront.toml. Every section has defaults so
//! an empty file (or no file at all) yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use storefront_client::{AutocompletePatch, RequestLayers, SearchRequestPatch};

/// Root configuration consumed once when the store boots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Customer identifier used by the search bridge
    #[serde(default)]
    pub customer_id: String,

    /// Search area (e.g. "Production", "Staging")
    #[serde(default = "default_area")]
    pub area: String,

    /// Language sent with every request, if any
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub collections: CollectionsConfig,

    #[serde(default)]
    pub page_size: PageSizeConfig,

    #[serde(default)]
    pub sort: SortConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub autocomplete: AutocompleteConfig,

    /// Layers applied to "more refinements" requests
    #[serde(default)]
    pub refinements: RequestLayers<SearchRequestPatch>,

    /// Layers applied to product detail requests
    #[serde(default)]
    pub details: RequestLayers<SearchRequestPatch>,

    #[serde(default)]
    pub navigations: NavigationsConfig,
}

fn default_area() -> String {
    "Production".to_string()
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            area: default_area(),
            language: None,
            collections: CollectionsConfig::default(),
            page_size: PageSizeConfig::default(),
            sort: SortConfig::default(),
            search: SearchConfig::default(),
            autocomplete: AutocompleteConfig::default(),
            refinements: RequestLayers::default(),
            details: RequestLayers::default(),
            navigations: NavigationsConfig::default(),
        }
    }
}

impl Configuration {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded storefront config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default storefront config");
        Self::default()
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = crate::read_config_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Collections the storefront can search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsConfig {
    #[serde(default = "default_collection")]
    pub default: String,

    /// Selectable collections; the default is always included
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_collection() -> String {
    "default".to_string()
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            default: default_collection(),
            options: Vec::new(),
        }
    }
}

impl CollectionsConfig {
    /// Option list with the default collection guaranteed to be present
    pub fn all(&self) -> Vec<String> {
        let mut all = self.options.clone();
        if !all.contains(&self.default) {
            all.insert(0, self.default.clone());
        }
        all
    }
}

/// Page size options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeConfig {
    #[serde(default = "default_page_size")]
    pub default: u64,

    #[serde(default = "default_page_size_options")]
    pub options: Vec<u64>,
}

fn default_page_size() -> u64 {
    10
}

fn default_page_size_options() -> Vec<u64> {
    vec![10, 25, 50, 100]
}

impl Default for PageSizeConfig {
    fn default() -> Self {
        Self {
            default: default_page_size(),
            options: default_page_size_options(),
        }
    }
}

/// One selectable sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: String,
    #[serde(default)]
    pub descending: bool,
    #[serde(default)]
    pub label: Option<String>,
}

/// Sort options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Sort selected at boot; must match one of the options
    #[serde(default)]
    pub default: Option<SortOption>,

    #[serde(default)]
    pub options: Vec<SortOption>,
}

/// Main search request settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(flatten)]
    pub layers: RequestLayers<SearchRequestPatch>,

    /// Record fields requested from the bridge
    pub fields: Vec<String>,

    /// Ask the bridge to drop refinements that cannot narrow the result
    pub prune_refinements: bool,

    /// Switch back to the default collection on every new search
    pub use_default_collection: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            layers: RequestLayers::default(),
            fields: vec!["*".to_string()],
            prune_refinements: true,
            use_default_collection: false,
        }
    }
}

/// Autocomplete tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Area override for autocomplete; falls back to the root area
    pub area: Option<String>,
    pub language: Option<String>,
    /// Collection override; falls back to the selected collection
    pub collection: Option<String>,
    pub suggestion_count: u32,
    pub navigation_count: u32,
    pub product_count: u64,
    /// Field whose values are offered as categories for the first suggestion
    pub category_field: Option<String>,
    pub sort_alphabetically: bool,
    pub fuzzy_matching: bool,
    pub suggestions: RequestLayers<AutocompletePatch>,
    pub products: RequestLayers<SearchRequestPatch>,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            area: None,
            language: None,
            collection: None,
            suggestion_count: 5,
            navigation_count: 5,
            product_count: 4,
            category_field: None,
            sort_alphabetically: false,
            fuzzy_matching: false,
            suggestions: RequestLayers::default(),
            products: RequestLayers::default(),
        }
    }
}

/// Navigation ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationsConfig {
    /// Fields shown first, in this order
    pub pinned: Vec<String>,

    /// Per field, refinement values shown first, in this order
    pub pinned_refinements: BTreeMap<String, Vec<String>>,

    /// Sort refinements by the sort hint the bridge returns for each navigation
    pub sort_refinements: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert_eq!(config.area, "Production");
        assert_eq!(config.collections.default, "default");
        assert_eq!(config.page_size.default, 10);
        assert_eq!(config.page_size.options, vec![10, 25, 50, 100]);
        assert!(config.sort.options.is_empty());
        assert!(config.search.prune_refinements);
        assert_eq!(config.autocomplete.suggestion_count, 5);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            customer_id = "acme"
            area = "Staging"

            [collections]
            default = "products"
            options = ["products", "sale"]

            [page_size]
            default = 24
            options = [12, 24, 48]

            [[sort.options]]
            field = "price"
            label = "Price: low to high"

            [[sort.options]]
            field = "price"
            descending = true

            [search]
            use_default_collection = true

            [search.defaults]
            disable_autocorrection = true

            [search.overrides]
            page_size = 12

            [autocomplete]
            category_field = "brand"
            suggestion_count = 8

            [navigations]
            pinned = ["brand", "price"]

            [navigations.pinned_refinements]
            brand = ["Nike"]
        "#;
        let config = Configuration::from_toml_str(toml).unwrap();
        assert_eq!(config.customer_id, "acme");
        assert_eq!(config.area, "Staging");
        assert_eq!(config.collections.all(), vec!["products", "sale"]);
        assert_eq!(config.page_size.default, 24);
        assert_eq!(config.sort.options.len(), 2);
        assert!(config.sort.options[1].descending);
        assert!(config.search.use_default_collection);
        assert_eq!(config.search.layers.defaults.disable_autocorrection, Some(true));
        assert_eq!(config.search.layers.overrides.page_size, Some(12));
        assert_eq!(config.autocomplete.category_field.as_deref(), Some("brand"));
        assert_eq!(config.autocomplete.suggestion_count, 8);
        // untouched autocomplete fields keep their defaults
        assert_eq!(config.autocomplete.navigation_count, 5);
        assert_eq!(config.navigations.pinned, vec!["brand", "price"]);
        assert_eq!(config.navigations.pinned_refinements["brand"], vec!["Nike"]);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = Configuration::from_toml_str(r#"language = "en""#).unwrap();
        assert_eq!(config.language.as_deref(), Some("en"));
        assert_eq!(config.area, "Production");
        assert_eq!(config.collections.all(), vec!["default"]);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(Configuration::from_toml_str("page_size = \"big\"").is_err());
    }
}
