//! Validation Middleware
//!
//! Consumes actions rejected by their validators so they never reach the
//! reducers. Rejection is a silent no-op; it only shows up in the debug log.

use crate::actions::Envelope;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::StoreState;
use crate::validators;

#[derive(Debug, Default)]
pub struct ValidationMiddleware;

impl ValidationMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for ValidationMiddleware {
    fn handle(&mut self, envelope: &Envelope, state: &StoreState, _dispatcher: &Dispatcher) -> bool {
        match validators::validate(&envelope.action, state) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Dropping action: {}", e);
                false
            }
        }
    }
}
