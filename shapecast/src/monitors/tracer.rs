use crate::{
    Delivery, Shape, SubscriptionId,
    monitoring::{HandlerFailure, Monitor, Removal},
};

/// A monitor that logs dispatcher activity to the `tracing` crate.
///
/// Log levels:
/// - `trace` - subscriptions, removals and dispatches (high volume)
/// - `warn` - handler failures
///
/// # Example
///
/// ```rust
/// use shapecast::{Dispatcher, monitors::Tracer};
///
/// let dispatcher = Dispatcher::new();
/// dispatcher.monitors().add(Tracer);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracer;

impl Monitor for Tracer {
    fn on_subscribed(&self, shape: &Shape, subscription: SubscriptionId, handler: &str) {
        tracing::trace!(
            shape = %shape,
            subscription = %subscription,
            handler = %handler,
            "subscribed"
        );
    }

    fn on_unsubscribed(&self, shape: &Shape, subscription: SubscriptionId, removal: Removal) {
        tracing::trace!(
            shape = %shape,
            subscription = %subscription,
            reason = %removal,
            "unsubscribed"
        );
    }

    fn on_dispatched(&self, delivery: &Delivery) {
        tracing::trace!(
            dispatch_id = %delivery.id(),
            shape = %delivery.shape(),
            invoked = delivery.invoked(),
            failed = delivery.failed().len(),
            "dispatched"
        );
    }

    fn on_handler_failed(&self, failure: &HandlerFailure) {
        tracing::warn!(
            dispatch_id = %failure.dispatch(),
            shape = %failure.shape(),
            subscription = %failure.subscription(),
            handler = %failure.handler(),
            error = %failure.error(),
            kind = failure.error().as_label(),
            removed = failure.was_removed(),
            "handler failed"
        );
    }
}
