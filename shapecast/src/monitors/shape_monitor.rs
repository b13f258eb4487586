use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::{
    Delivery, Shape, SubscriptionId,
    internal::lock,
    monitoring::{HandlerFailure, Monitor, Removal},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ShapeStats {
    active: usize,
    dispatches: usize,
    failures: usize,
}

/// Monitor that keeps per-shape counters.
///
/// Register a clone with the dispatcher and query the original at any time
/// from any thread.
///
/// ```rust
/// use shapecast::{Dispatcher, Event, Handler, IntValue, monitors::ShapeMonitor};
///
/// let dispatcher = Dispatcher::new();
/// let stats = ShapeMonitor::new();
/// dispatcher.monitors().add(stats.clone());
///
/// dispatcher.subscribe(&Handler::new(|_: &IntValue| {}));
/// dispatcher.dispatch(&IntValue::new(1));
///
/// assert_eq!(stats.active_subscriptions(&IntValue::SHAPE), 1);
/// assert_eq!(stats.dispatch_count(&IntValue::SHAPE), 1);
/// assert_eq!(stats.failure_count(&IntValue::SHAPE), 0);
/// ```
#[derive(Clone, Default)]
pub struct ShapeMonitor {
    inner: Arc<Mutex<HashMap<Shape, ShapeStats>>>,
}

impl ShapeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers currently subscribed to `shape`, as seen by this monitor.
    pub fn active_subscriptions(&self, shape: &Shape) -> usize {
        self.stats(shape).active
    }

    /// Dispatches of `shape`, including ones without subscribers.
    pub fn dispatch_count(&self, shape: &Shape) -> usize {
        self.stats(shape).dispatches
    }

    /// Handler failures observed while dispatching `shape`.
    pub fn failure_count(&self, shape: &Shape) -> usize {
        self.stats(shape).failures
    }

    /// Shapes seen so far, sorted by tag.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = lock(&self.inner).keys().cloned().collect();
        shapes.sort();
        shapes
    }

    fn stats(&self, shape: &Shape) -> ShapeStats {
        lock(&self.inner).get(shape).copied().unwrap_or_default()
    }

    fn update(&self, shape: &Shape, f: impl FnOnce(&mut ShapeStats)) {
        let mut map = lock(&self.inner);
        f(map.entry(shape.clone()).or_default());
    }
}

impl Monitor for ShapeMonitor {
    fn on_subscribed(&self, shape: &Shape, _subscription: SubscriptionId, _handler: &str) {
        self.update(shape, |s| s.active += 1);
    }

    fn on_unsubscribed(&self, shape: &Shape, _subscription: SubscriptionId, _removal: Removal) {
        self.update(shape, |s| s.active = s.active.saturating_sub(1));
    }

    fn on_dispatched(&self, delivery: &Delivery) {
        self.update(delivery.shape(), |s| s.dispatches += 1);
    }

    fn on_handler_failed(&self, failure: &HandlerFailure) {
        self.update(failure.shape(), |s| s.failures += 1);
    }
}

impl fmt::Debug for ShapeMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = lock(&self.inner);
        f.debug_struct("ShapeMonitor")
            .field("shapes", &map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> Shape {
        Shape::new("tick")
    }

    #[test]
    fn default_is_empty() {
        let m = ShapeMonitor::default();
        assert!(m.shapes().is_empty());
        assert_eq!(m.active_subscriptions(&shape()), 0);
    }

    #[test]
    fn subscriptions_are_counted_up_and_down() {
        let monitor = ShapeMonitor::new();
        let m: &dyn Monitor = &monitor;
        m.on_subscribed(&shape(), SubscriptionId::new(0), "a");
        m.on_subscribed(&shape(), SubscriptionId::new(1), "b");
        m.on_unsubscribed(&shape(), SubscriptionId::new(0), Removal::Failed);

        assert_eq!(monitor.active_subscriptions(&shape()), 1);
    }

    #[test]
    fn removal_never_underflows() {
        let monitor = ShapeMonitor::new();
        monitor.on_unsubscribed(&shape(), SubscriptionId::new(0), Removal::Cleared);
        assert_eq!(monitor.active_subscriptions(&shape()), 0);
    }

    #[test]
    fn dispatches_are_counted_per_shape() {
        let monitor = ShapeMonitor::new();
        monitor.on_dispatched(&Delivery::new(crate::DispatchId::new(0), shape()));
        monitor.on_dispatched(&Delivery::new(crate::DispatchId::new(0), shape()));
        monitor.on_dispatched(&Delivery::new(crate::DispatchId::new(0), Shape::new("tock")));

        assert_eq!(monitor.dispatch_count(&shape()), 2);
        assert_eq!(monitor.dispatch_count(&Shape::new("tock")), 1);
        assert_eq!(monitor.shapes(), vec![Shape::new("tick"), Shape::new("tock")]);
    }

    #[test]
    fn clone_shares_state() {
        let monitor = ShapeMonitor::new();
        let query = monitor.clone();
        monitor.on_dispatched(&Delivery::new(crate::DispatchId::new(0), shape()));
        assert_eq!(query.dispatch_count(&shape()), 1);
    }
}
