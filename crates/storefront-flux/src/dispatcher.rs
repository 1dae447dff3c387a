//! Dispatcher for middleware action dispatch
//!
//! Middleware and the tasks it spawns hand results back to the store through
//! the Dispatcher. Everything dispatched here is queued on the store's channel
//! and re-enters the full middleware chain when the store drains the queue.
//!
//! Effects are "latest wins" per [`EffectKey`]: starting an effect issues a
//! [`Ticket`], and a completion whose ticket has been superseded is dropped
//! by the store instead of being applied.

use crate::actions::Dispatchable;
use crate::state::RequestKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifies effects that supersede each other
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectKey {
    Request(RequestKind),
    /// Counts run per collection and do not cancel each other
    CollectionCount(String),
}

/// Proof of which effect run produced a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: EffectKey,
    pub generation: u64,
}

/// An entry of the store's queue
#[derive(Debug)]
pub struct Queued {
    pub dispatchable: Dispatchable,
    pub ticket: Option<Ticket>,
}

/// An issued effect run that has not handed its result back yet
///
/// Dropping it without [`PendingEffect::complete`] (the task panicked or was
/// cancelled) settles the run so the in-flight count still drains.
pub struct PendingEffect {
    dispatcher: Dispatcher,
    ticket: Option<Ticket>,
}

impl PendingEffect {
    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    pub fn complete(mut self, dispatchable: impl Into<Dispatchable>) {
        if let Some(ticket) = self.ticket.take() {
            self.dispatcher.complete(ticket, dispatchable);
        }
    }
}

impl Drop for PendingEffect {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            log::warn!(
                "Effect {:?} (generation {}) ended without a result",
                ticket.key,
                ticket.generation
            );
            self.dispatcher.settle();
        }
    }
}

/// Dispatcher for sending actions through the middleware chain
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Queued>,
    generations: Arc<Mutex<HashMap<EffectKey, u64>>>,
    in_flight: Arc<AtomicUsize>,
}

impl Dispatcher {
    /// Create a new dispatcher feeding the store's queue
    pub fn new(action_tx: Sender<Queued>) -> Self {
        Self {
            action_tx,
            generations: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue anything dispatchable
    pub fn dispatch(&self, dispatchable: impl Into<Dispatchable>) {
        self.send(Queued {
            dispatchable: dispatchable.into(),
            ticket: None,
        });
    }

    /// Start a new effect run for `key`, superseding any earlier run
    pub fn issue(&self, key: EffectKey) -> Ticket {
        let mut generations = self.generations();
        let generation = generations.entry(key.clone()).or_insert(0);
        *generation += 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        Ticket {
            key,
            generation: *generation,
        }
    }

    /// Issue a ticket for `key` wrapped in a guard owned by the running task
    pub fn begin(&self, key: EffectKey) -> PendingEffect {
        PendingEffect {
            ticket: Some(self.issue(key)),
            dispatcher: self.clone(),
        }
    }

    /// Queue the completion of the effect run identified by `ticket`
    pub fn complete(&self, ticket: Ticket, dispatchable: impl Into<Dispatchable>) {
        self.send(Queued {
            dispatchable: dispatchable.into(),
            ticket: Some(ticket),
        });
    }

    /// Whether no later run has been issued for the ticket's key
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generations().get(&ticket.key) == Some(&ticket.generation)
    }

    /// Effect runs issued but not yet received back by the store
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Called by the store once a ticketed completion has been dequeued
    pub(crate) fn settle(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1));
    }

    fn send(&self, queued: Queued) {
        if let Err(e) = self.action_tx.send(queued) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }

    fn generations(&self) -> MutexGuard<'_, HashMap<EffectKey, u64>> {
        self.generations.lock().unwrap_or_else(|e| e.into_inner())
    }
}
