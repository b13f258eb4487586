use std::{fmt, sync::Arc};

use crate::{DispatchId, Error, Shape, SubscriptionId};

/// Why a registration was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    /// [`Dispatcher::unsubscribe`](crate::Dispatcher::unsubscribe) with the handler.
    Unsubscribed,
    /// [`Dispatcher::cancel`](crate::Dispatcher::cancel) with the subscription token.
    Cancelled,
    /// The handler failed during dispatch under [`FailurePolicy::Unsubscribe`](crate::FailurePolicy::Unsubscribe).
    Failed,
    /// [`Dispatcher::clear`](crate::Dispatcher::clear).
    Cleared,
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::Unsubscribed => write!(f, "unsubscribed"),
            Removal::Cancelled => write!(f, "cancelled"),
            Removal::Failed => write!(f, "failed"),
            Removal::Cleared => write!(f, "cleared"),
        }
    }
}

/// Report of one handler failing during one dispatch.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    pub(crate) dispatch: DispatchId,
    pub(crate) shape: Shape,
    pub(crate) subscription: SubscriptionId,
    pub(crate) handler: Arc<str>,
    pub(crate) error: Error,
    pub(crate) removed: bool,
}

impl HandlerFailure {
    /// The dispatch during which the handler failed.
    pub fn dispatch(&self) -> DispatchId {
        self.dispatch
    }

    /// Shape of the event being dispatched.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Registration of the failing handler.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Diagnostic name of the failing handler.
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// What went wrong.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// `true` if the handler was unsubscribed because of this failure.
    ///
    /// `false` under [`FailurePolicy::Retain`](crate::FailurePolicy::Retain),
    /// or when the registration was already gone (e.g. the handler
    /// unsubscribed itself before failing).
    pub fn was_removed(&self) -> bool {
        self.removed
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "handler '{}' ({}) failed on shape '{}': {}",
            self.handler, self.subscription, self.shape, self.error
        )
    }
}
