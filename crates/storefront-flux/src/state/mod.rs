//! Store State Module
//!
//! Contains the normalized state document, organized by subsection.

mod app;
mod autocomplete;
mod collections;
mod indexed;
mod navigation;
mod page;
mod products;
mod query;
mod session;

pub use app::{Data, StoreState, UiState, GLOBAL_COMPONENT_ID};
pub use autocomplete::{Autocomplete, AutocompleteNavigation, Category};
pub use collections::{Collection, Collections};
pub use indexed::Indexed;
pub use navigation::{Navigation, NavigationSort, Refinement, RefinementKind, SortField};
pub use page::{Page, PageSizes, PageWindow};
pub use products::{Details, IsFetching, Product, RequestKind, Template};
pub use query::{Query, Sort, Sorts};
pub use session::Session;
