use crate::{DispatchId, Shape, SubscriptionId};

/// Summary of one [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) call.
///
/// Dispatch never fails, so callers are free to ignore this. It is mostly
/// useful in tests and monitors.
///
/// ```rust
/// use shapecast::{Dispatcher, Handler, IntValue};
///
/// let dispatcher = Dispatcher::new();
/// dispatcher.subscribe(&Handler::new(|_: &IntValue| {}));
/// dispatcher.subscribe(&Handler::new(|_: &IntValue| -> Result<(), String> { Err("bad".into()) }));
///
/// let delivery = dispatcher.dispatch(&IntValue::new(1));
/// assert_eq!(delivery.invoked(), 2);
/// assert_eq!(delivery.failed().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    id: DispatchId,
    shape: Shape,
    invoked: usize,
    failed: Vec<SubscriptionId>,
}

impl Delivery {
    pub(crate) fn new(id: DispatchId, shape: Shape) -> Self {
        Self {
            id,
            shape,
            invoked: 0,
            failed: Vec::new(),
        }
    }

    pub(crate) fn record_invoked(&mut self) {
        self.invoked += 1;
    }

    pub(crate) fn record_failed(&mut self, subscription: SubscriptionId) {
        self.failed.push(subscription);
    }

    /// Identifier of this dispatch.
    pub fn id(&self) -> DispatchId {
        self.id
    }

    /// Shape of the dispatched event.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of handlers invoked, failed ones included.
    pub fn invoked(&self) -> usize {
        self.invoked
    }

    /// Registrations whose handler failed, in invocation order.
    pub fn failed(&self) -> &[SubscriptionId] {
        &self.failed
    }

    /// `true` if no handler failed. A dispatch without subscribers is clean.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
