use std::{
    fmt,
    sync::{Arc, Mutex},
};

use crate::{Event, Handler, internal::lock};

/// A handler that keeps a copy of every event it receives.
///
/// Clones share the same log and the same [`Handler`] identity, so a clone
/// can be handed to the code under test while the original is queried.
pub struct Recorder<E: Event + Clone> {
    events: Arc<Mutex<Vec<E>>>,
    handler: Handler<E>,
}

impl<E: Event + Clone> Recorder<E> {
    pub fn new() -> Self {
        Self::named("recorder")
    }

    pub fn named(name: &str) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let handler = Handler::named(name, move |e: &E| lock(&sink).push(e.clone()));
        Self { events, handler }
    }

    /// The handler to subscribe.
    pub fn handler(&self) -> &Handler<E> {
        &self.handler
    }

    /// Copy of the events received so far, in delivery order.
    pub fn values(&self) -> Vec<E> {
        lock(&self.events).clone()
    }

    /// Number of events received so far.
    pub fn count(&self) -> usize {
        lock(&self.events).len()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<E> {
        lock(&self.events).last().cloned()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        lock(&self.events).clear();
    }
}

impl<E: Event + Clone> Clone for Recorder<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<E: Event + Clone> Default for Recorder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event + Clone> fmt::Debug for Recorder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("handler", &self.handler)
            .field("count", &self.count())
            .finish()
    }
}
