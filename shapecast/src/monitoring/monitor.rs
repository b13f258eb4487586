use crate::{Delivery, Shape, SubscriptionId, monitoring::HandlerFailure, monitoring::Removal};

/// Trait for observing dispatcher activity.
///
/// All methods have default no-op implementations, so you only need to
/// override the ones you care about.
///
/// Monitors are called synchronously on the thread performing the
/// operation, after the registry has been updated and with no internal lock
/// held. A monitor may therefore call back into the dispatcher. A monitor
/// that panics is removed.
///
/// # Order of callbacks for one dispatch
///
/// 1. [`on_handler_failed`](Self::on_handler_failed) for each failing handler, as it fails
/// 2. [`on_unsubscribed`](Self::on_unsubscribed) with [`Removal::Failed`] if the handler was removed
/// 3. [`on_dispatched`](Self::on_dispatched) once, after every handler has run
pub trait Monitor: Send + Sync {
    /// Called when a handler is registered for a shape.
    ///
    /// Not called for redundant subscriptions of an already registered handler.
    fn on_subscribed(&self, shape: &Shape, subscription: SubscriptionId, handler: &str) {
        let _s = shape;
        let _i = subscription;
        let _h = handler;
    }

    /// Called when a registration is removed.
    fn on_unsubscribed(&self, shape: &Shape, subscription: SubscriptionId, removal: Removal) {
        let _s = shape;
        let _i = subscription;
        let _r = removal;
    }

    /// Called after a dispatch has invoked every handler in its snapshot.
    ///
    /// Fires for dispatches with no subscribers too (`delivery.invoked() == 0`).
    fn on_dispatched(&self, delivery: &Delivery) {
        let _d = delivery;
    }

    /// Called when a handler returns an error, panics or rejects the event.
    fn on_handler_failed(&self, failure: &HandlerFailure) {
        let _f = failure;
    }
}
