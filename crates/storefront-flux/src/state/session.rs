use serde::{Deserialize, Serialize};
use storefront_client::SearchRequest;
use storefront_config::Configuration;

/// Per-visitor session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Correlates every action of the current recall (fresh search intent)
    pub recall_id: Option<String>,
    /// Correlates every action that changes the next search request
    pub search_id: Option<String>,
    pub config: Configuration,
    /// Request that produced the products currently in the store
    pub last_search_request: Option<SearchRequest>,
}
