//! Backend client traits
//!
//! The store never talks to the network itself. Effects receive
//! implementations of these traits and only see requests going in and
//! responses (or errors) coming out.

use crate::types::{
    AutocompleteRequest, AutocompleteResponse, RefinementsResponse, SearchRequest, SearchResponse,
};
use async_trait::async_trait;

/// Search bridge trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared across
/// effect tasks.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_client::{SearchBridge, SearchRequest};
///
/// async fn count(bridge: &dyn SearchBridge) -> anyhow::Result<u64> {
///     let response = bridge.search(&SearchRequest::default()).await?;
///     Ok(response.total_record_count)
/// }
/// ```
#[async_trait]
pub trait SearchBridge: Send + Sync {
    /// Run a search
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse>;

    /// Fetch the complete refinement list of one navigation
    ///
    /// # Arguments
    ///
    /// * `request` - The search request the navigation belongs to
    /// * `navigation_name` - Field of the navigation to expand
    async fn refinements(
        &self,
        request: &SearchRequest,
        navigation_name: &str,
    ) -> anyhow::Result<RefinementsResponse>;
}

/// Autocomplete (search-as-you-type) service
#[async_trait]
pub trait AutocompleteClient: Send + Sync {
    /// Fetch term and navigation suggestions for a partial query
    async fn suggestions(
        &self,
        request: &AutocompleteRequest,
    ) -> anyhow::Result<AutocompleteResponse>;
}
