//! Session Reducer
//!
//! Picks up correlation ids from action metadata and remembers the request
//! behind the products currently shown.

use crate::actions::{Action, Envelope};
use crate::state::Session;

pub fn reduce(mut state: Session, envelope: &Envelope) -> Session {
    if let Some(recall_id) = &envelope.meta.recall_id {
        state.recall_id = Some(recall_id.clone());
    }
    if let Some(search_id) = &envelope.meta.search_id {
        state.search_id = Some(search_id.clone());
    }

    if let Action::ReceiveProducts(Ok(received)) = &envelope.action {
        state.last_search_request = Some(received.request.clone());
    }
    state
}
