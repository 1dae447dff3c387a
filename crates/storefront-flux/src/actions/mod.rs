//! Actions module
//!
//! The closed action vocabulary of the store. Every action is a variant of
//! [`Action`]; its type name (`UPDATE_QUERY`, `RECEIVE_PRODUCTS`, ...) comes
//! from the generated [`ActionType`] discriminant.
//!
//! Actions fall into four groups:
//! - Updates: user intent that changes what the next search asks for
//! - Fetch intents: ask the effects middleware to start a request
//! - Receives: the result of a request, `Err` when it failed
//! - Bookkeeping: component scratch state and whole-state replacement

pub mod correlation;
pub mod creators;
mod dispatchable;

pub use correlation::{
    stamp_correlation_ids, IdGenerator, SequentialIds, UuidGenerator, RECALL_CHANGING,
    SEARCH_CHANGING,
};
pub use creators::SearchUpdate;
pub use dispatchable::{Dispatchable, Thunk};

use crate::error::FetchError;
use crate::state::{
    AutocompleteNavigation, Navigation, PageWindow, Product, Query, Refinement, RequestKind,
    StoreState, Template,
};
use serde_json::Value;
use storefront_client::{SearchRequest, SearchResponse, SelectedRefinement};
use strum::{EnumDiscriminants, IntoStaticStr};

/// Result of a fetch as carried by a receive action
pub type Received<T> = Result<T, FetchError>;

/// A refinement to add to a navigation
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementTarget {
    pub navigation_id: String,
    pub refinement: Refinement,
}

/// A refinement addressed by its index within a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTarget {
    pub navigation_id: String,
    pub index: usize,
}

/// Which navigations lose their selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetTarget {
    All,
    Field(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductsReceived {
    /// Request that produced the response
    pub request: SearchRequest,
    pub response: SearchResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoreRefinements {
    pub navigation_id: String,
    pub refinements: Vec<Refinement>,
    /// Indices into `refinements` that were selected before the fetch
    pub selected: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteSuggestions {
    pub suggestions: Vec<String>,
    pub categories: Vec<String>,
    pub navigations: Vec<AutocompleteNavigation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCount {
    pub collection: String,
    pub count: u64,
}

/// Root action enum
#[derive(Debug, Clone, PartialEq, EnumDiscriminants, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum_discriminants(
    name(ActionType),
    derive(Hash, strum::Display, IntoStaticStr),
    strum(serialize_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Action {
    // Updates
    /// `None` clears the query
    UpdateQuery(Option<String>),
    ReceiveQuery(Query),
    AddRefinement(RefinementTarget),
    SelectRefinement(IndexTarget),
    DeselectRefinement(IndexTarget),
    ResetRefinements(ResetTarget),
    ResetPage,
    UpdateCurrentPage(u64),
    UpdatePageSize(u64),
    ReceivePage(PageWindow),
    SelectCollection(String),
    /// Index into the configured sorts
    SelectSort(usize),
    UpdateDetails(Product),
    UpdateAutocompleteQuery(String),

    // Fetch intents
    FetchProducts,
    /// Number of additional products to load
    FetchMoreProducts(u64),
    /// Navigation whose remaining refinements should be loaded
    FetchMoreRefinements(String),
    FetchAutocompleteSuggestions(String),
    FetchAutocompleteProducts {
        query: String,
        refinements: Vec<SelectedRefinement>,
    },
    /// Product id
    FetchProductDetails(String),
    FetchCollectionCount(String),

    // Receives
    ReceiveProducts(Received<ProductsReceived>),
    ReceiveMoreProducts(Received<Vec<Product>>),
    ReceiveMoreRefinements(Received<MoreRefinements>),
    ReceiveAutocompleteSuggestions(Received<AutocompleteSuggestions>),
    ReceiveAutocompleteProducts(Received<Vec<Product>>),
    ReceiveDetailsProduct(Received<Product>),
    ReceiveCollectionCount(Received<CollectionCount>),

    // Derived from a products response
    ReceiveProductRecords(Vec<Product>),
    ReceiveNavigations(Vec<Navigation>),
    ReceiveRecordCount(u64),
    ReceiveTemplate(Template),
    ReceiveRedirect(String),

    // Bookkeeping
    CreateComponentState {
        tag: String,
        id: String,
        state: Value,
    },
    RemoveComponentState {
        tag: String,
        id: String,
    },
    RefreshState(Box<StoreState>),
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        self.into()
    }

    /// The type name, e.g. `UPDATE_QUERY`
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Request kind whose in-flight flag this action raises (`true`) or clears (`false`)
    pub fn fetch_flag(&self) -> Option<(RequestKind, bool)> {
        let flag = match self {
            Action::FetchProducts => (RequestKind::Search, true),
            Action::FetchMoreProducts(_) => (RequestKind::MoreProducts, true),
            Action::FetchMoreRefinements(_) => (RequestKind::MoreRefinements, true),
            Action::FetchAutocompleteSuggestions(_) => (RequestKind::AutocompleteSuggestions, true),
            Action::FetchAutocompleteProducts { .. } => (RequestKind::AutocompleteProducts, true),
            Action::FetchProductDetails(_) => (RequestKind::Details, true),
            Action::ReceiveProducts(_) => (RequestKind::Search, false),
            Action::ReceiveMoreProducts(_) => (RequestKind::MoreProducts, false),
            Action::ReceiveMoreRefinements(_) => (RequestKind::MoreRefinements, false),
            Action::ReceiveAutocompleteSuggestions(_) => {
                (RequestKind::AutocompleteSuggestions, false)
            }
            Action::ReceiveAutocompleteProducts(_) => (RequestKind::AutocompleteProducts, false),
            Action::ReceiveDetailsProduct(_) => (RequestKind::Details, false),
            _ => return None,
        };
        Some(flag)
    }

    /// The failure carried by an errored receive action
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Action::ReceiveProducts(Err(e))
            | Action::ReceiveMoreProducts(Err(e))
            | Action::ReceiveMoreRefinements(Err(e))
            | Action::ReceiveAutocompleteSuggestions(Err(e))
            | Action::ReceiveAutocompleteProducts(Err(e))
            | Action::ReceiveDetailsProduct(Err(e))
            | Action::ReceiveCollectionCount(Err(e)) => Some(e),
            _ => None,
        }
    }
}

/// Correlation ids attached to an action before it reaches the reducers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub recall_id: Option<String>,
    pub search_id: Option<String>,
}

/// An action together with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub action: Action,
    pub meta: Meta,
}

impl From<Action> for Envelope {
    fn from(action: Action) -> Self {
        Self {
            action,
            meta: Meta::default(),
        }
    }
}
