use crate::actions::Envelope;
use crate::dispatcher::Dispatcher;
use crate::state::StoreState;

pub mod effects_middleware;
pub mod logging_middleware;
pub mod validation_middleware;

pub use effects_middleware::EffectsMiddleware;
pub use logging_middleware::LoggingMiddleware;
pub use validation_middleware::ValidationMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware sees every action of a dispatched unit in order, each time with
/// the state produced by the previous member.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `envelope`: The action to process, with its correlation ids
    /// - `state`: Current store state (read-only snapshot)
    /// - `dispatcher`: Use to queue actions that should re-enter the chain
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, envelope: &Envelope, state: &StoreState, dispatcher: &Dispatcher) -> bool;
}
