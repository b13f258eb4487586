use std::{
    fmt,
    sync::{Arc, Mutex},
};

use crate::{
    Shape, SubscriptionId,
    internal::lock,
    monitoring::{HandlerFailure, Monitor, Removal},
};

#[derive(Default)]
struct Log {
    failures: Vec<HandlerFailure>,
    removals: Vec<(Shape, SubscriptionId, Removal)>,
}

/// Monitor that collects handler failures and removals.
///
/// ```ignore
/// let log = FailureLog::new();
/// dispatcher.monitors().add(log.clone());
///
/// dispatcher.dispatch(&event);
/// assert_eq!(log.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct FailureLog {
    inner: Arc<Mutex<Log>>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures observed so far, in order.
    pub fn failures(&self) -> Vec<HandlerFailure> {
        lock(&self.inner).failures.clone()
    }

    /// Number of failures observed so far.
    pub fn count(&self) -> usize {
        lock(&self.inner).failures.len()
    }

    /// `true` if no handler has failed.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Registrations removed so far, with the reason.
    pub fn removals(&self) -> Vec<(Shape, SubscriptionId, Removal)> {
        lock(&self.inner).removals.clone()
    }
}

impl Monitor for FailureLog {
    fn on_unsubscribed(&self, shape: &Shape, subscription: SubscriptionId, removal: Removal) {
        lock(&self.inner)
            .removals
            .push((shape.clone(), subscription, removal));
    }

    fn on_handler_failed(&self, failure: &HandlerFailure) {
        lock(&self.inner).failures.push(failure.clone());
    }
}

impl fmt::Debug for FailureLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = lock(&self.inner);
        f.debug_struct("FailureLog")
            .field("failures", &log.failures.len())
            .field("removals", &log.removals.len())
            .finish()
    }
}
