use crate::actions::{Action, Envelope};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::StoreState;

/// LoggingMiddleware - logs all actions passing through
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, envelope: &Envelope, _state: &StoreState, _dispatcher: &Dispatcher) -> bool {
        match &envelope.action {
            // a full state dump is too noisy for the log
            Action::RefreshState(_) => log::debug!("Action: {}", envelope.action.name()),
            action => log::debug!("Action: {:?} {:?}", action, envelope.meta),
        }
        if let Some(error) = envelope.action.fetch_error() {
            log::error!("{} failed: {}", envelope.action.name(), error);
        }

        true // Always pass action through
    }
}
