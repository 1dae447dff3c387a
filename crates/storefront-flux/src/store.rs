//! Store
//!
//! Holds the state and runs the dispatch loop. One dispatched unit is
//! resolved, stamped with correlation ids and applied member by member:
//! middleware chain, root reducer, change observer, subscribers. Completions
//! of effect tasks arrive on the queue and go through exactly the same path.

use crate::actions::{stamp_correlation_ids, Dispatchable, Envelope, IdGenerator, UuidGenerator};
use crate::dispatcher::{Dispatcher, Queued};
use crate::middleware::Middleware;
use crate::observer::{observe, Event};
use crate::reducers::app_reducer::reduce;
use crate::state::StoreState;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

type Subscriber = Box<dyn FnMut(&Event) + Send>;

/// Store - holds application state and manages the dispatch loop
pub struct Store {
    state: StoreState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    queue: Receiver<Queued>,
    ids: Box<dyn IdGenerator>,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(initial_state: StoreState) -> Self {
        let (tx, queue) = channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(tx),
            queue,
            ids: Box::new(UuidGenerator),
            subscribers: Vec::new(),
        }
    }

    /// Replace the source of correlation ids
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Register a callback receiving every change event
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Event) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply a unit, then everything it queued synchronously
    pub fn dispatch(&mut self, dispatchable: impl Into<Dispatchable>) {
        self.process(Queued {
            dispatchable: dispatchable.into(),
            ticket: None,
        });
        self.poll();
    }

    /// Apply everything currently queued without waiting
    ///
    /// Returns how many queue entries were taken.
    pub fn poll(&mut self) -> usize {
        let mut taken = 0;
        while let Ok(queued) = self.queue.try_recv() {
            self.process(queued);
            taken += 1;
        }
        taken
    }

    /// Wait up to `timeout` for the next queue entry, then drain the queue
    pub fn pump(&mut self, timeout: Duration) -> usize {
        match self.queue.recv_timeout(timeout) {
            Ok(queued) => {
                self.process(queued);
                1 + self.poll()
            }
            Err(RecvTimeoutError::Timeout) => 0,
            Err(RecvTimeoutError::Disconnected) => {
                // the store owns a sender clone, so this only happens on teardown
                log::warn!("Store queue disconnected");
                0
            }
        }
    }

    fn process(&mut self, queued: Queued) {
        if let Some(ticket) = &queued.ticket {
            self.dispatcher.settle();
            if !self.dispatcher.is_current(ticket) {
                log::debug!(
                    "Dropping stale completion of {:?} (generation {})",
                    ticket.key,
                    ticket.generation
                );
                return;
            }
        }

        let actions = queued.dispatchable.resolve(&self.state);
        if actions.is_empty() {
            return;
        }

        for envelope in stamp_correlation_ids(actions, self.ids.as_mut()) {
            self.apply(envelope);
        }
    }

    fn apply(&mut self, envelope: Envelope) {
        // Pass through middleware chain
        for middleware in &mut self.middleware {
            if !middleware.handle(&envelope, &self.state, &self.dispatcher) {
                return;
            }
        }

        let next = reduce(self.state.clone(), &envelope);

        let mut events = Vec::new();
        observe(&self.state, &next, &mut |event| events.push(event));
        if let Some(error) = envelope.action.fetch_error() {
            events.push(Event::from_fetch_error(error));
        }
        self.state = next;

        for event in &events {
            for subscriber in &mut self.subscribers {
                subscriber(event);
            }
        }
    }
}
