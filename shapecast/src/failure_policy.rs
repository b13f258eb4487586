use std::fmt;

/// Controls what happens to a handler that fails during dispatch.
///
/// A handler fails when it returns `Err`, panics, or cannot accept the
/// event it was given. Whatever the policy, the failure never reaches the
/// caller of [`dispatch`](crate::Dispatcher::dispatch), the remaining
/// handlers still run, and registered monitors receive
/// [`on_handler_failed`](crate::monitoring::Monitor::on_handler_failed).
///
/// | Policy | After a failure | Use case |
/// |--------|-----------------|----------|
/// | [`Unsubscribe`](Self::Unsubscribe) | The handler is removed from its shape | Self-healing: a broken listener stops being called |
/// | [`Retain`](Self::Retain) | The handler stays subscribed | Handlers that fail transiently and should keep receiving events |
///
/// # Default
///
/// `Unsubscribe`. A failing handler never receives another dispatch unless
/// it is explicitly subscribed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Remove the failing handler from its shape.
    #[default]
    Unsubscribe,

    /// Report the failure and keep the handler subscribed.
    Retain,
}

impl FailurePolicy {
    /// Returns `true` if this is the [`Unsubscribe`](Self::Unsubscribe) policy.
    pub fn is_unsubscribe(&self) -> bool {
        matches!(self, FailurePolicy::Unsubscribe)
    }

    /// Returns `true` if this is the [`Retain`](Self::Retain) policy.
    pub fn is_retain(&self) -> bool {
        matches!(self, FailurePolicy::Retain)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Unsubscribe => write!(f, "Unsubscribe"),
            FailurePolicy::Retain => write!(f, "Retain"),
        }
    }
}
