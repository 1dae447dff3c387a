//! Search backend collaborators for the storefront state layer
//!
//! This crate provides the wire types exchanged with the search bridge and
//! the autocomplete service, the async traits the store talks to, and an
//! in-memory fixture backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │      SearchBridge trait      │   │   AutocompleteClient trait   │
//! │  - search()                  │   │  - suggestions()             │
//! │  - refinements()             │   │                              │
//! └──────────────────────────────┘   └──────────────────────────────┘
//!                 │                                  │
//!                 └────────────────┬─────────────────┘
//!                                  ▼
//!                      ┌──────────────────────┐
//!                      │    FixtureClient     │
//!                      │ (canned responses)   │
//!                      └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_client::{FixtureClient, SearchBridge, SearchRequest, SearchResponse};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = FixtureClient::new().with_fallback(SearchResponse::default());
//! let response = client.search(&SearchRequest::default()).await?;
//! assert_eq!(response.total_record_count, 0);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod fixture_client;
pub mod patch;
pub mod types;

pub use client::{AutocompleteClient, SearchBridge};
pub use error::ClientError;
pub use fixture_client::{FixtureClient, FixtureFile};
pub use patch::{RequestLayers, RequestPatch};
pub use types::{
    AutocompleteNavigationDto, AutocompletePatch, AutocompleteRequest, AutocompleteResponse,
    AutocompleteResult, BackendNavigation, BackendRefinement, BackendSort, BackendTemplate,
    CustomUrlParam, PageInfo, Record, RefinementsResponse, SearchRequest, SearchRequestPatch,
    SearchResponse, SearchTerm, SelectedRefinement, SortOrder,
};
