use super::{
    Autocomplete, Category, Collections, Details, Indexed, IsFetching, Navigation, Page, PageSizes,
    Product, Query, Session, Sort, Sorts, Template,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use storefront_config::Configuration;

/// Component id whose state is merged under every other id of the same tag
pub const GLOBAL_COMPONENT_ID: &str = "global";

/// Scratch state of UI components: tag name → component id → state
pub type UiState = BTreeMap<String, BTreeMap<String, Value>>;

/// Search data shared by every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub query: Query,
    pub sorts: Sorts,
    pub products: Vec<Product>,
    /// Set once the first search response landed
    pub products_loaded: bool,
    pub record_count: u64,
    pub collections: Collections,
    pub navigations: Indexed<Navigation>,
    pub autocomplete: Autocomplete,
    pub page: Page,
    pub template: Template,
    pub details: Details,
    pub redirect: Option<String>,
    pub warnings: Vec<String>,
    pub is_fetching: IsFetching,
}

/// Root state document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub session: Session,
    pub data: Data,
    pub ui: UiState,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::from_config(Configuration::default())
    }
}

impl StoreState {
    /// Derive the initial state of every subsection from configuration
    pub fn from_config(config: Configuration) -> Self {
        let collections = Collections::new(
            config.collections.default.clone(),
            config.collections.all(),
        );

        let data = Data {
            query: Query::default(),
            sorts: initial_sorts(&config),
            products: Vec::new(),
            products_loaded: false,
            record_count: 0,
            collections,
            navigations: Indexed::new(),
            autocomplete: Autocomplete {
                category: Category {
                    field: config.autocomplete.category_field.clone(),
                    values: Vec::new(),
                },
                ..Autocomplete::default()
            },
            page: Page::new(initial_page_sizes(&config)),
            template: Template::default(),
            details: Details::default(),
            redirect: None,
            warnings: Vec::new(),
            is_fetching: IsFetching::default(),
        };

        log::debug!(
            "Initial state: collection={}, page sizes={:?}, {} sorts",
            data.collections.selected,
            data.page.sizes.items,
            data.sorts.items.len()
        );

        Self {
            session: Session {
                config,
                ..Session::default()
            },
            data,
            ui: UiState::new(),
        }
    }
}

/// Page size options with the configured default guaranteed to be selectable
fn initial_page_sizes(config: &Configuration) -> PageSizes {
    let default = config.page_size.default;
    let mut items = config.page_size.options.clone();
    if !items.contains(&default) {
        items.push(default);
        items.sort_unstable();
    }
    let selected = items.iter().position(|&size| size == default).unwrap_or(0);
    PageSizes { items, selected }
}

fn initial_sorts(config: &Configuration) -> Sorts {
    let mut items: Vec<Sort> = config
        .sort
        .options
        .iter()
        .map(|option| Sort {
            field: option.field.clone(),
            descending: option.descending,
            label: option.label.clone(),
        })
        .collect();

    let selected = match &config.sort.default {
        Some(default) => {
            let found = items
                .iter()
                .position(|sort| sort.field == default.field && sort.descending == default.descending);
            match found {
                Some(index) => index,
                None => {
                    items.insert(
                        0,
                        Sort {
                            field: default.field.clone(),
                            descending: default.descending,
                            label: default.label.clone(),
                        },
                    );
                    0
                }
            }
        }
        None => 0,
    };

    Sorts { selected, items }
}
