//! Adapters
//!
//! Pure conversions between backend payloads and store entities.

mod autocomplete;
mod navigations;
mod page;
mod refinements;
mod search;

pub use autocomplete::extract_autocomplete;
pub use navigations::{
    combine_navigations, extract_navigation, extract_navigation_sort, prune_refinements,
    sort_navigations, sort_refinements,
};
pub use page::extract_page;
pub use refinements::{extract_refinement, refinements_match, to_selected_refinement};
pub use search::{augment_products, extract_query, extract_template};
