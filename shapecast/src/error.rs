use std::sync::Arc;

use crate::Shape;

/// Boxed error accepted from fallible handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a handler invocation failed.
///
/// The dispatcher never returns this from [`subscribe`](crate::Dispatcher::subscribe),
/// [`unsubscribe`](crate::Dispatcher::unsubscribe) or
/// [`dispatch`](crate::Dispatcher::dispatch). It is carried by
/// [`HandlerFailure`](crate::monitoring::HandlerFailure) so monitors can see
/// what went wrong.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("handler failed: {0}")]
    HandlerFailed(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("event of shape '{shape}' is a {actual}, handler expects {expected}")]
    ShapeMismatch {
        shape: Shape,
        expected: &'static str,
        actual: &'static str,
    },
}

impl Error {
    pub fn handler(e: impl Into<BoxError>) -> Self {
        Error::HandlerFailed(Arc::from(e.into()))
    }

    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let msg = if let Some(msg) = payload.downcast_ref::<&'static str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        Error::Panicked(msg)
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::HandlerFailed(_) => "handler_failed",
            Error::Panicked(_) => "handler_panicked",
            Error::ShapeMismatch { .. } => "shape_mismatch",
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::HandlerFailed(a), Self::HandlerFailed(b)) => Arc::ptr_eq(a, b),
            (Self::Panicked(a), Self::Panicked(b)) => a == b,
            (
                Self::ShapeMismatch {
                    shape: s1,
                    expected: e1,
                    actual: a1,
                },
                Self::ShapeMismatch {
                    shape: s2,
                    expected: e2,
                    actual: a2,
                },
            ) => s1 == s2 && e1 == e2 && a1 == a2,
            _ => false,
        }
    }
}

impl Eq for Error {}
