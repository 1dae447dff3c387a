//! Unidirectional state store for a product-search storefront
//!
//! UI code expresses intents through action creators; the store gates every
//! action through its validators, folds it into the state with pure reducers
//! and reports what changed as named events. Fetch intents are picked up by
//! the effects middleware, which calls the search backend and feeds the
//! result back in as a receive action.
//!
//! # Architecture
//!
//! ```text
//!  creators ──► Store::dispatch ──► middleware chain ──► reducers ──► observer ──► subscribers
//!                     ▲               (logging,                          │
//!                     │                validation,                       ▼
//!                     │                effects)                     selectors
//!                     │                   │
//!                     └──── Dispatcher ◄──┘  (receive actions, latest run only)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use storefront_client::FixtureClient;
//! use storefront_config::Configuration;
//! use storefront_flux::{selectors, Storefront};
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = FixtureClient::from_path("fixtures.json")?;
//! let mut storefront = Storefront::new(
//!     Configuration::load(),
//!     Arc::new(client.clone()),
//!     Arc::new(client),
//! )?;
//!
//! storefront.search(Some("red shoes".to_string()));
//! storefront.wait(Duration::from_secs(5));
//! println!("{} records", selectors::record_count(storefront.state()));
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod adapters;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod observer;
pub mod reducers;
pub mod requests;
pub mod selectors;
pub mod state;
pub mod store;
pub mod storefront;
pub mod validators;

pub use actions::{Action, ActionType, Dispatchable, Envelope};
pub use dispatcher::Dispatcher;
pub use error::{FetchError, ValidationError};
pub use observer::Event;
pub use state::StoreState;
pub use store::Store;
pub use storefront::Storefront;
