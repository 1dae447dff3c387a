//! Reducers
//!
//! One pure reducer per state subsection. `app_reducer::reduce` is the root
//! and fans every action out to all of them.

pub mod app_reducer;
pub mod autocomplete_reducer;
pub mod collections_reducer;
pub mod details_reducer;
pub mod is_fetching_reducer;
pub mod navigations_reducer;
pub mod page_reducer;
pub mod products_reducer;
pub mod query_reducer;
pub mod session_reducer;
pub mod sorts_reducer;
pub mod ui_reducer;
