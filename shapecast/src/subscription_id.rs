use std::fmt;

/// Token identifying one registration in a [`Dispatcher`](crate::Dispatcher).
///
/// Returned by [`Dispatcher::subscribe`](crate::Dispatcher::subscribe).
/// Subscribing an already registered handler returns its existing token;
/// a handler that is unsubscribed and subscribed again gets a new one.
/// Pass the token to [`Dispatcher::cancel`](crate::Dispatcher::cancel) to
/// unsubscribe without keeping the handler around.
///
/// Tokens are unique within one dispatcher and increase with registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

impl From<SubscriptionId> for u64 {
    fn from(value: SubscriptionId) -> Self {
        value.0
    }
}
